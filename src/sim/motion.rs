//! Pin motion variants
//!
//! The physics step is identical across play modes except for how pins
//! decelerate and whether untouched pins move on their own. Each mode is a
//! `PinMotion` implementation chosen when the game is constructed.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::state::{Lane, Pin};
use crate::consts::*;
use crate::settings::PlayMode;
use crate::{lane_left_boundary, lane_right_boundary};

/// Mode-specific pin behaviour plugged into the physics step
pub trait PinMotion: fmt::Debug {
    /// Play mode this motion implements
    fn mode(&self) -> PlayMode;

    /// Per-reference-tick velocity decay
    fn deceleration(&self) -> f32 {
        self.mode().deceleration()
    }

    /// Drive pins before integration (called once per step). `ratio` is the
    /// step length in reference ticks.
    fn steer(&mut self, _pins: &mut [Pin], _lane: &Lane, _ratio: f32) {}

    /// Whether hit pins that have come to rest are swept off the lane mid-throw
    fn sweeps_settled_hits(&self) -> bool {
        false
    }

    /// Restore initial state for a fresh rack
    fn reset(&mut self) {}
}

/// Build the motion for a play mode
pub fn motion_for(mode: PlayMode) -> Box<dyn PinMotion> {
    match mode {
        PlayMode::Standard => Box::new(StandardMotion),
        PlayMode::Oscillating => Box::new(OscillatingRowMotion::new()),
    }
}

/// Pins stand still until struck
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardMotion;

impl PinMotion for StandardMotion {
    fn mode(&self) -> PlayMode {
        PlayMode::Standard
    }
}

/// Horizontal travel direction of an oscillating row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowDirection {
    Left,
    Right,
}

impl RowDirection {
    pub fn flipped(self) -> Self {
        match self {
            RowDirection::Left => RowDirection::Right,
            RowDirection::Right => RowDirection::Left,
        }
    }

    pub fn sign(self) -> f32 {
        match self {
            RowDirection::Left => -1.0,
            RowDirection::Right => 1.0,
        }
    }
}

/// Initial row directions: alternating, head row heading right
const DEFAULT_ROW_DIRECTIONS: [RowDirection; PIN_ROWS] = [
    RowDirection::Right,
    RowDirection::Left,
    RowDirection::Right,
    RowDirection::Left,
];

/// Untouched pins slide side to side, each row bouncing between the lane
/// edges independently
#[derive(Debug, Clone)]
pub struct OscillatingRowMotion {
    directions: [RowDirection; PIN_ROWS],
}

impl OscillatingRowMotion {
    pub fn new() -> Self {
        Self {
            directions: DEFAULT_ROW_DIRECTIONS,
        }
    }

    /// Current direction of a row (1-based)
    pub fn direction(&self, row: usize) -> RowDirection {
        self.directions[row - 1]
    }
}

impl Default for OscillatingRowMotion {
    fn default() -> Self {
        Self::new()
    }
}

impl PinMotion for OscillatingRowMotion {
    fn mode(&self) -> PlayMode {
        PlayMode::Oscillating
    }

    fn steer(&mut self, pins: &mut [Pin], lane: &Lane, ratio: f32) {
        let left = lane_left_boundary(lane) + OSCILLATION_MARGIN;
        let right = lane_right_boundary(lane) - OSCILLATION_MARGIN;
        let step = (OSCILLATION_SPEED * ratio).max(0.0);

        // Horizontal extent of the untouched pins in each row
        let mut extents: [Option<(f32, f32)>; PIN_ROWS] = [None; PIN_ROWS];
        for pin in pins.iter().filter(|p| p.active && !p.hit) {
            let lo = pin.body.pos.x - pin.body.radius;
            let hi = pin.body.pos.x + pin.body.radius;
            let extent = &mut extents[pin.row() - 1];
            *extent = Some(match *extent {
                Some((a, b)) => (a.min(lo), b.max(hi)),
                None => (lo, hi),
            });
        }

        let mut speeds = [0.0f32; PIN_ROWS];
        for (idx, extent) in extents.iter().enumerate() {
            let Some((lo, hi)) = *extent else {
                continue;
            };
            let room = |dir: RowDirection| match dir {
                RowDirection::Left => lo - left,
                RowDirection::Right => right - hi,
            };

            // Turn rows that reached an edge. Checking the current direction
            // keeps a row from flipping twice in one step.
            let mut dir = self.directions[idx];
            if room(dir) <= 0.0 {
                dir = dir.flipped();
                self.directions[idx] = dir;
            }

            // A long step stops the row at the edge instead of carrying it past
            let travel = room(dir).min(step).max(0.0);
            let scale = if step > 0.0 { travel / step } else { 1.0 };
            speeds[idx] = dir.sign() * OSCILLATION_SPEED * scale;
        }

        for pin in pins.iter_mut().filter(|p| p.active && !p.hit) {
            pin.body.vel.x = speeds[pin.row() - 1];
        }
    }

    fn sweeps_settled_hits(&self) -> bool {
        true
    }

    fn reset(&mut self) {
        self.directions = DEFAULT_ROW_DIRECTIONS;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::build_rack;

    #[test]
    fn test_standard_motion_leaves_pins_alone() {
        let lane = Lane::default();
        let mut pins = build_rack(&lane);
        let mut motion = StandardMotion;

        motion.steer(&mut pins, &lane, 1.0);

        assert!(pins.iter().all(|p| p.is_settled()));
        assert!(!motion.sweeps_settled_hits());
        assert_eq!(motion.deceleration(), STANDARD_DECELERATION);
    }

    #[test]
    fn test_rows_get_their_direction() {
        let lane = Lane::default();
        let mut pins = build_rack(&lane);
        let mut motion = OscillatingRowMotion::new();

        motion.steer(&mut pins, &lane, 1.0);

        for pin in &pins {
            let expected = DEFAULT_ROW_DIRECTIONS[pin.row() - 1].sign() * OSCILLATION_SPEED;
            assert_eq!(pin.body.vel.x, expected, "pin {}", pin.id);
            assert_eq!(pin.body.vel.y, 0.0);
        }
        assert_eq!(motion.deceleration(), OSCILLATING_DECELERATION);
    }

    #[test]
    fn test_row_flips_at_right_edge() {
        let lane = Lane::default();
        let mut pins = build_rack(&lane);
        let mut motion = OscillatingRowMotion::new();
        assert_eq!(motion.direction(1), RowDirection::Right);

        // Push the head pin against the right edge
        pins[0].body.pos.x = lane_right_boundary(&lane) - OSCILLATION_MARGIN - PIN_RADIUS + 1.0;
        motion.steer(&mut pins, &lane, 1.0);

        assert_eq!(motion.direction(1), RowDirection::Left);
        assert!(pins[0].body.vel.x < 0.0);
        // Other rows unaffected
        assert_eq!(motion.direction(3), RowDirection::Right);
    }

    #[test]
    fn test_row_flips_once_per_step() {
        let lane = Lane::default();
        let mut pins = build_rack(&lane);
        let mut motion = OscillatingRowMotion::new();
        assert_eq!(motion.direction(2), RowDirection::Left);

        // Both row-2 pins at the left edge
        pins[1].body.pos.x = lane_left_boundary(&lane);
        pins[2].body.pos.x = lane_left_boundary(&lane) + 5.0;
        motion.steer(&mut pins, &lane, 1.0);

        assert_eq!(motion.direction(2), RowDirection::Right);
    }

    #[test]
    fn test_hit_pins_are_not_steered() {
        let lane = Lane::default();
        let mut pins = build_rack(&lane);
        let mut motion = OscillatingRowMotion::new();
        pins[0].hit = true;

        motion.steer(&mut pins, &lane, 1.0);

        assert_eq!(pins[0].body.vel.x, 0.0);
    }

    #[test]
    fn test_reset_restores_default_directions() {
        let lane = Lane::default();
        let mut pins = build_rack(&lane);
        let mut motion = OscillatingRowMotion::new();
        pins[0].body.pos.x = lane_right_boundary(&lane);
        motion.steer(&mut pins, &lane, 1.0);
        assert_eq!(motion.direction(1), RowDirection::Left);

        motion.reset();

        assert_eq!(motion.direction(1), RowDirection::Right);
    }

    #[test]
    fn test_motion_for_mode() {
        assert_eq!(motion_for(PlayMode::Standard).mode(), PlayMode::Standard);
        assert_eq!(motion_for(PlayMode::Oscillating).mode(), PlayMode::Oscillating);
        assert!(motion_for(PlayMode::Oscillating).sweeps_settled_hits());
    }

    #[test]
    fn test_long_step_stops_row_at_edge() {
        let lane = Lane::default();
        let mut pins = build_rack(&lane);
        let mut motion = OscillatingRowMotion::new();
        let left = lane_left_boundary(&lane) + OSCILLATION_MARGIN;
        let right = lane_right_boundary(&lane) - OSCILLATION_MARGIN;

        // Back row heads left with 15.5px of room; give it a 90-tick step
        motion.steer(&mut pins, &lane, 90.0);

        let room = pins[6].body.pos.x - PIN_RADIUS - left;
        let travel = -pins[6].body.vel.x * 90.0;
        assert!((travel - room).abs() < 1e-3, "travel {travel} room {room}");
        // Head pin has plenty of room and still moves at full speed
        assert_eq!(pins[0].body.vel.x, OSCILLATION_SPEED);
        assert!(pins[0].body.pos.x + PIN_RADIUS + OSCILLATION_SPEED * 90.0 < right);
    }

    #[test]
    fn test_row_at_edge_turns_and_moves_away() {
        let lane = Lane::default();
        let mut pins = build_rack(&lane);
        let mut motion = OscillatingRowMotion::new();
        let left = lane_left_boundary(&lane) + OSCILLATION_MARGIN;
        // Park row 4 flush against the left edge
        let shift = pins[6].body.pos.x - PIN_RADIUS - left;
        for pin in pins.iter_mut().filter(|p| p.row() == 4) {
            pin.body.pos.x -= shift;
        }

        motion.steer(&mut pins, &lane, 1.0);

        assert_eq!(motion.direction(4), RowDirection::Right);
        assert!(pins[6..].iter().all(|p| p.body.vel.x == OSCILLATION_SPEED));
    }
}
