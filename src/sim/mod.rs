//! Simulation core
//!
//! Physics, scoring and game flow. Nothing in here renders, reads input
//! devices or keeps time; hosts feed elapsed time and gestures in and read
//! plain data back out.

pub mod collision;
pub mod engine;
pub mod motion;
pub mod scoring;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{Contact, resolve};
pub use engine::{advance, settle, tick_ratio};
pub use motion::{OscillatingRowMotion, PinMotion, RowDirection, StandardMotion, motion_for};
pub use scoring::{
    Frame, Scorecard, ThrowOutcome, frame_is_spare, frame_is_strike, record_throw,
    recalculate_cumulative, spare_bonus, strike_bonus, ten_first_is_strike, ten_second_is_spare,
    ten_second_is_strike, ten_third_is_strike,
};
pub use snapshot::Snapshot;
pub use state::{Ball, Body, GamePhase, GameState, Lane, Pin, RenderState, build_rack};
pub use tick::{TickInput, evaluate, on_aim_move, on_release, tick};
