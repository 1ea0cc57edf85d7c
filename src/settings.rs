//! Play mode and lane configuration
//!
//! Settings are read once when a game is constructed; changing them
//! afterwards has no effect on a running game.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Pin motion variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PlayMode {
    /// Pins stand still until struck
    #[default]
    Standard,
    /// Untouched pin rows slide side to side across the lane
    Oscillating,
}

impl PlayMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlayMode::Standard => "Standard",
            PlayMode::Oscillating => "Oscillating",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "standard" | "normal" => Some(PlayMode::Standard),
            "oscillating" | "miga" => Some(PlayMode::Oscillating),
            _ => None,
        }
    }

    /// Per-reference-tick velocity decay applied to moving pins
    pub fn deceleration(&self) -> f32 {
        match self {
            PlayMode::Standard => STANDARD_DECELERATION,
            PlayMode::Oscillating => OSCILLATING_DECELERATION,
        }
    }
}

/// Lane geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaneSettings {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub gutter_width: f32,
}

impl Default for LaneSettings {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: LANE_WIDTH,
            height: LANE_HEIGHT,
            gutter_width: GUTTER_WIDTH,
        }
    }
}

/// Game settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Pin motion variant
    pub mode: PlayMode,
    /// Lane placement and size
    pub lane: LaneSettings,
}

impl Settings {
    /// Settings with the given play mode and default lane
    pub fn with_mode(mode: PlayMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let settings: Settings = serde_json::from_str(json)?;
        Ok(settings)
    }

    /// Parse settings from JSON, falling back to defaults on error
    pub fn load_or_default(json: Option<&str>) -> Self {
        match json.map(Self::from_json) {
            Some(Ok(settings)) => {
                log::info!("Loaded settings (mode: {})", settings.mode.as_str());
                settings
            }
            Some(Err(e)) => {
                log::warn!("Invalid settings, using defaults: {}", e);
                Self::default()
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }
}
