//! Game state and core simulation types
//!
//! Everything a host reads to draw a frame lives here: lane, ball, rack,
//! scorecard and the game phase.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::motion::{PinMotion, motion_for};
use super::scoring::Scorecard;
use crate::consts::*;
use crate::settings::{PlayMode, Settings};
use crate::{lane_center_x, lane_left_boundary, lane_right_boundary};

/// Current phase of play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// First load, before the very first throw
    Initialized,
    /// Ball parked, waiting for aim and release
    NotRunning,
    /// Ball released, simulation live
    Running,
    /// Throw concluded, scoring pending
    FrameDone,
    /// Tenth frame resolved
    Over,
}

impl GamePhase {
    /// Label for logging
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Initialized => "initialized",
            GamePhase::NotRunning => "not_running",
            GamePhase::Running => "running",
            GamePhase::FrameDone => "frame_done",
            GamePhase::Over => "over",
        }
    }
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Presentation hint derived from the game phase.
///
/// Only used to pick on-screen messaging; gameplay never branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderState {
    /// Show the title / "tap to roll" prompt
    Initialized,
    /// Nothing to overlay
    Running,
    /// Throw is over, prompt the player to return the ball
    BallReturn,
    /// Show the game over message
    Over,
}

impl RenderState {
    /// Project the authoritative phase plus the settling observation
    pub fn derive(phase: GamePhase, ready_for_return: bool) -> Self {
        match phase {
            GamePhase::Initialized => RenderState::Initialized,
            GamePhase::Over => RenderState::Over,
            GamePhase::FrameDone => RenderState::BallReturn,
            GamePhase::Running if ready_for_return => RenderState::BallReturn,
            GamePhase::Running | GamePhase::NotRunning => RenderState::Running,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RenderState::Initialized => "initialized",
            RenderState::Running => "running",
            RenderState::BallReturn => "ball_return",
            RenderState::Over => "over",
        }
    }
}

/// Lane geometry: a playable strip flanked by two gutters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lane {
    pub x: f32,
    pub y: f32,
    /// Width of the playable surface (gutters excluded)
    pub width: f32,
    pub height: f32,
    pub gutter_width: f32,
}

impl Lane {
    pub fn new(x: f32, y: f32, width: f32, height: f32, gutter_width: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            gutter_width,
        }
    }

    /// Whether a point lies on the lane or in a gutter
    pub fn contains(&self, pos: Vec2) -> bool {
        pos.x >= self.x
            && pos.x <= self.x + self.width + 2.0 * self.gutter_width
            && pos.y >= self.y
            && pos.y <= self.y + self.height
    }
}

impl Default for Lane {
    fn default() -> Self {
        Self::new(0.0, 0.0, LANE_WIDTH, LANE_HEIGHT, GUTTER_WIDTH)
    }
}

/// Circle rigid body shared by the ball and the pins
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub mass: f32,
}

impl Body {
    pub fn new(pos: Vec2, radius: f32, mass: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius,
            mass,
        }
    }

    #[inline]
    pub fn inv_mass(&self) -> f32 {
        1.0 / self.mass
    }
}

/// The bowling ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub body: Body,
    /// Where the ball is parked between throws
    pub start: Vec2,
    /// False while aiming, true once released
    pub rolling: bool,
}

impl Ball {
    pub fn new(start: Vec2) -> Self {
        let mut body = Body::new(start, BALL_RADIUS, BALL_MASS);
        body.vel = Vec2::new(0.0, -BALL_SPEED);
        Self {
            body,
            start,
            rolling: false,
        }
    }

    /// Park the ball back at its starting point
    pub fn reset(&mut self) {
        self.body.pos = self.start;
        self.body.vel = Vec2::new(0.0, -BALL_SPEED);
        self.rolling = false;
    }

    /// Move the parked ball sideways, keeping it on the playable surface
    pub fn aim(&mut self, x: f32, lane: &Lane) {
        let min_x = lane_left_boundary(lane) + self.body.radius;
        let max_x = lane_right_boundary(lane) - self.body.radius;
        self.body.pos.x = x.clamp(min_x, max_x);
    }

    /// Whether the ball has fully rolled past the far end of the lane
    pub fn is_out_of_lane(&self, lane: &Lane) -> bool {
        self.body.pos.y + self.body.radius < lane.y
    }
}

/// A single pin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pin {
    /// 1..=10, row-major from the head pin
    pub id: u8,
    pub body: Body,
    /// False once the pin has left the lane; stays false until the rack is rebuilt
    pub active: bool,
    /// Set on first contact; never cleared within a rack
    pub hit: bool,
    /// Knockdown already credited to a frame
    pub scored: bool,
}

impl Pin {
    pub fn new(id: u8, pos: Vec2) -> Self {
        Self {
            id,
            body: Body::new(pos, PIN_RADIUS, PIN_MASS),
            active: true,
            hit: false,
            scored: false,
        }
    }

    /// Rack row (1 = head pin) from the triangular numbering
    pub fn row(&self) -> usize {
        row_for_id(self.id)
    }

    /// At rest: both velocity components truncated to exactly zero
    #[inline]
    pub fn is_settled(&self) -> bool {
        self.body.vel == Vec2::ZERO
    }

    /// Remove from play for the rest of this rack
    pub fn deactivate(&mut self) {
        self.active = false;
        self.body.vel = Vec2::ZERO;
    }
}

/// Row k holds ids k(k-1)/2+1 ..= k(k+1)/2
pub fn row_for_id(id: u8) -> usize {
    debug_assert!((1..=PIN_COUNT as u8).contains(&id), "pin id out of range: {id}");
    let id = id as usize;
    (1..=PIN_ROWS)
        .find(|k| id <= k * (k + 1) / 2)
        .unwrap_or(PIN_ROWS)
}

/// Build a full ten-pin rack centered on the playable lane, head pin nearest the ball
pub fn build_rack(lane: &Lane) -> Vec<Pin> {
    let center_x = lane_center_x(lane);
    let base_y = lane.y + RACK_BASE_OFFSET;
    let mut pins = Vec::with_capacity(PIN_COUNT);
    let mut id = 0u8;

    for row in 0..PIN_ROWS {
        let cols = row + 1;
        let row_width = (cols - 1) as f32 * PIN_SPACING_X;
        let y = base_y + (PIN_ROWS - row) as f32 * PIN_SPACING_Y;
        for col in 0..cols {
            id += 1;
            let x = center_x - row_width / 2.0 + col as f32 * PIN_SPACING_X;
            pins.push(Pin::new(id, Vec2::new(x, y)));
        }
    }

    pins
}

/// Complete game context, explicitly owned by the host
#[derive(Debug)]
pub struct GameState {
    pub lane: Lane,
    pub ball: Ball,
    pub pins: Vec<Pin>,
    pub scorecard: Scorecard,
    pub phase: GamePhase,
    /// Presentation hint, recomputed on every evaluation
    pub render_state: RenderState,
    /// Nothing left on the lane can still be struck this throw
    pub ready_for_return: bool,
    /// Time since the ball rolled off the far end (ms)
    pub ball_out_ms: f32,
    /// Pin motion variant selected at construction
    pub motion: Box<dyn PinMotion>,
}

impl GameState {
    /// New game with default settings
    pub fn new() -> Self {
        Self::with_settings(&Settings::default())
    }

    pub fn with_settings(settings: &Settings) -> Self {
        let l = settings.lane;
        let lane = Lane::new(l.x, l.y, l.width, l.height, l.gutter_width);
        let start = Vec2::new(lane_center_x(&lane), lane.y + lane.height - BALL_START_OFFSET);

        log::info!(
            "New game: mode={}, lane {}x{} (gutter {})",
            settings.mode.as_str(),
            lane.width,
            lane.height,
            lane.gutter_width
        );

        Self {
            lane,
            ball: Ball::new(start),
            pins: build_rack(&lane),
            scorecard: Scorecard::new(),
            phase: GamePhase::Initialized,
            render_state: RenderState::Initialized,
            ready_for_return: false,
            ball_out_ms: 0.0,
            motion: motion_for(settings.mode),
        }
    }

    pub fn mode(&self) -> PlayMode {
        self.motion.mode()
    }

    /// Park the ball and clear per-throw observations
    pub fn reset_ball(&mut self) {
        self.ball.reset();
        self.ready_for_return = false;
        self.ball_out_ms = 0.0;
    }

    /// Fresh rack of ten pins plus a parked ball
    pub fn reset_lane(&mut self) {
        log::debug!("Resetting lane");
        self.pins = build_rack(&self.lane);
        self.motion.reset();
        self.reset_ball();
    }

    /// Remove knocked pins, leaving survivors standing where they are
    pub fn clear_hit_pins(&mut self) {
        for pin in self.pins.iter_mut().filter(|p| p.hit) {
            pin.deactivate();
        }
    }

    /// New scorecard, rack and ball
    pub fn reset_game(&mut self) {
        log::info!("Starting new game");
        self.scorecard.reset();
        self.reset_lane();
    }

    /// Active pins, in id order
    pub fn active_pins(&self) -> impl Iterator<Item = &Pin> {
        self.pins.iter().filter(|p| p.active)
    }

    pub(crate) fn set_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            log::debug!("Game phase: {} -> {}", self.phase, phase);
            self.phase = phase;
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
