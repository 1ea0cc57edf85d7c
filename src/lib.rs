//! Lane Thirty - single-lane ten-pin bowling
//!
//! Core modules:
//! - `sim`: Simulation core (pin physics, scoring, game flow state machine)
//! - `ticker`: Timestamp to elapsed-time conversion for the host frame loop
//! - `settings`: Play mode and lane geometry configuration
//! - `platform`: Browser host bindings

pub mod platform;
pub mod settings;
pub mod sim;
pub mod ticker;

pub use settings::{PlayMode, Settings};
pub use ticker::Ticker;

use sim::Lane;

/// Game configuration constants
pub mod consts {
    /// Reference tick rate the per-step constants are tuned for (Hz)
    pub const REFERENCE_TICK_HZ: f32 = 60.0;
    /// Reference interval between ticks (ms)
    pub const REFERENCE_INTERVAL_MS: f32 = 1000.0 / REFERENCE_TICK_HZ;

    /// Lane dimensions (pixels)
    pub const LANE_WIDTH: f32 = 350.0;
    pub const LANE_HEIGHT: f32 = 683.0;
    pub const GUTTER_WIDTH: f32 = 20.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 25.0;
    pub const BALL_MASS: f32 = 7.5;
    /// Forward speed in pixels per reference tick
    pub const BALL_SPEED: f32 = 8.5;
    /// Distance of the ball's starting point above the lane's near edge
    pub const BALL_START_OFFSET: f32 = 60.0;

    /// Pin defaults
    pub const PIN_COUNT: usize = 10;
    pub const PIN_ROWS: usize = 4;
    pub const PIN_RADIUS: f32 = 14.5;
    pub const PIN_MASS: f32 = 1.0;
    pub const PIN_SPACING_X: f32 = 90.0;
    pub const PIN_SPACING_Y: f32 = 50.0;
    /// Vertical offset of the rack base from the lane's far edge
    pub const RACK_BASE_OFFSET: f32 = -20.0;

    /// Collision restitution (damped, inelastic-leaning bounce)
    pub const RESTITUTION: f32 = -0.23;

    /// Per-reference-tick velocity decay for pins
    pub const STANDARD_DECELERATION: f32 = 0.01;
    pub const OSCILLATING_DECELERATION: f32 = 0.03;

    /// Oscillating rows: horizontal speed (pixels per reference tick)
    pub const OSCILLATION_SPEED: f32 = 1.5;
    /// Oscillating rows: distance from the playable edge at which a row turns
    pub const OSCILLATION_MARGIN: f32 = 10.0;

    /// Pin velocities are truncated to this many decimal places each step
    pub const VELOCITY_PRECISION: i32 = 3;

    /// Time after the ball leaves the lane past which no pin can still be struck (ms)
    pub const BALL_RETURN_DELAY_MS: f32 = 2500.0;

    /// Frames in a game
    pub const FRAME_COUNT: usize = 10;
    /// Pins knocked down by a strike
    pub const STRIKE: u8 = 10;
}

/// Left edge of the playable lane surface
#[inline]
pub fn lane_left_boundary(lane: &Lane) -> f32 {
    lane.x + lane.gutter_width
}

/// Right edge of the playable lane surface
#[inline]
pub fn lane_right_boundary(lane: &Lane) -> f32 {
    lane.x + lane.width + lane.gutter_width
}

/// Horizontal center of the playable lane surface
#[inline]
pub fn lane_center_x(lane: &Lane) -> f32 {
    lane.x + lane.gutter_width + lane.width / 2.0
}

/// Truncate toward zero at `places` decimal places
#[inline]
pub fn truncate_to(value: f32, places: i32) -> f32 {
    let scale = 10f32.powi(places);
    (value * scale).trunc() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lane_boundaries() {
        let lane = Lane::new(0.0, 0.0, 350.0, 683.0, 20.0);
        assert_eq!(lane_left_boundary(&lane), 20.0);
        assert_eq!(lane_right_boundary(&lane), 370.0);
        assert_eq!(lane_center_x(&lane), 195.0);
    }

    #[test]
    fn test_truncate_to() {
        assert_eq!(truncate_to(0.0009, 3), 0.0);
        assert_eq!(truncate_to(-0.0009, 3), 0.0);
        assert!((truncate_to(0.123456, 3) - 0.123).abs() < 1e-6);
        assert!((truncate_to(-1.98765, 3) + 1.987).abs() < 1e-6);
    }
}
