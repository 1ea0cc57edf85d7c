//! Read-only view of the game for hosts that draw it

use serde::Serialize;

use super::scoring::Frame;
use super::state::{GamePhase, GameState, Lane, RenderState};

#[derive(Debug, Clone, Serialize)]
pub struct BallView {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    pub hit: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PinView {
    pub id: u8,
    pub x: f32,
    pub y: f32,
    pub r: f32,
    pub hit: bool,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub ball: BallView,
    /// Active pins only
    pub pins: Vec<PinView>,
    pub lane: Lane,
    pub frames: Vec<Frame>,
    pub current_frame: usize,
    pub roll_in_frame: u8,
    pub phase: GamePhase,
    pub render_state: RenderState,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let ball = &state.ball.body;
        Self {
            ball: BallView {
                x: ball.pos.x,
                y: ball.pos.y,
                r: ball.radius,
                hit: false,
            },
            pins: state
                .active_pins()
                .map(|p| PinView {
                    id: p.id,
                    x: p.body.pos.x,
                    y: p.body.pos.y,
                    r: p.body.radius,
                    hit: p.hit,
                })
                .collect(),
            lane: state.lane,
            frames: state.scorecard.frames.to_vec(),
            current_frame: state.scorecard.current_frame,
            roll_in_frame: state.scorecard.roll_in_frame,
            phase: state.phase,
            render_state: state.render_state,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
