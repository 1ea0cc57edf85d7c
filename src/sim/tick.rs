//! Per-tick simulation and game flow
//!
//! Each host frame runs physics, then evaluates the state machine once
//! autonomously, then applies any queued gestures. A gesture is a second
//! evaluation in the same tick with `is_user_input` set, so the two never
//! interfere.

use super::engine::advance;
use super::scoring::ThrowOutcome;
use super::state::{GamePhase, GameState, RenderState};
use crate::consts::BALL_RETURN_DELAY_MS;

/// Gestures queued by the host for one tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer x for aiming the parked ball
    pub aim_x: Option<f32>,
    /// Release / tap
    pub release: bool,
}

/// Advance the game by `elapsed_ms` and apply queued gestures
pub fn tick(state: &mut GameState, input: &TickInput, elapsed_ms: f32) {
    advance(
        &mut state.ball,
        &mut state.pins,
        &state.lane,
        state.motion.as_mut(),
        elapsed_ms,
    );

    if state.phase == GamePhase::Running {
        if state.ball.is_out_of_lane(&state.lane) {
            state.ball_out_ms += elapsed_ms;
        }

        if state.motion.sweeps_settled_hits() {
            for pin in state
                .pins
                .iter_mut()
                .filter(|p| p.active && p.hit && p.is_settled())
            {
                log::debug!("Sweeping settled pin {}", pin.id);
                pin.deactivate();
            }
        }
    }

    evaluate(state, false);

    if let Some(x) = input.aim_x {
        on_aim_move(state, x);
    }
    if input.release {
        on_release(state);
    }
}

/// Aim gesture: slide the parked ball, clamped to the playable lane
pub fn on_aim_move(state: &mut GameState, pointer_x: f32) {
    if state.phase != GamePhase::Running {
        state.ball.aim(pointer_x, &state.lane);
    }
}

/// Release / tap gesture
pub fn on_release(state: &mut GameState) {
    evaluate(state, true);
}

/// Run the state machine once.
///
/// Called every tick with `is_user_input == false` and once per gesture
/// with `true`.
pub fn evaluate(state: &mut GameState, is_user_input: bool) {
    match state.phase {
        GamePhase::Initialized | GamePhase::NotRunning => {
            if is_user_input {
                log::debug!("Ball released at x={:.1}", state.ball.body.pos.x);
                state.ball.rolling = true;
                state.set_phase(GamePhase::Running);
            }
        }
        GamePhase::Running => {
            let ball_out = state.ball.is_out_of_lane(&state.lane);

            if !state.ready_for_return
                && (all_pins_complete(state, ball_out) || state.ball_out_ms >= BALL_RETURN_DELAY_MS)
            {
                log::debug!("Throw settled, ready for ball return");
                state.ready_for_return = true;
            }

            if ball_out && is_user_input {
                state.set_phase(GamePhase::FrameDone);
            }
        }
        GamePhase::FrameDone => {
            if !is_user_input {
                finish_throw(state);
            }
        }
        GamePhase::Over => {
            if is_user_input {
                state.reset_game();
                state.set_phase(GamePhase::NotRunning);
            }
        }
    }

    state.render_state = RenderState::derive(state.phase, state.ready_for_return);
}

/// No active pin is still moving
pub fn no_moving_pins_within_lane(state: &GameState) -> bool {
    state.active_pins().all(|p| p.is_settled())
}

/// Nothing left that could still be struck: every pin is gone, or is an
/// untouched standing pin with the ball gone and the lane at rest.
pub fn all_pins_complete(state: &GameState, ball_out: bool) -> bool {
    let lane_at_rest = no_moving_pins_within_lane(state);
    state
        .pins
        .iter()
        .all(|p| !p.active || (!p.hit && ball_out && lane_at_rest))
}

/// Credit knocked pins to the scorecard and set up the next throw
fn finish_throw(state: &mut GameState) {
    let knocked = state.pins.iter().filter(|p| p.hit && !p.scored).count() as u8;
    for pin in state.pins.iter_mut() {
        pin.scored = pin.hit;
    }

    match state.scorecard.record(knocked) {
        ThrowOutcome::FrameAlreadyComplete => {
            state.set_phase(GamePhase::Over);
        }
        ThrowOutcome::Recorded { reset_rack, .. } => {
            if state.scorecard.is_game_over() {
                log::info!("Game over: final score {}", state.scorecard.total());
                state.set_phase(GamePhase::Over);
            } else if reset_rack {
                state.reset_lane();
                state.set_phase(GamePhase::NotRunning);
            } else {
                state.clear_hit_pins();
                state.reset_ball();
                state.set_phase(GamePhase::NotRunning);
            }
        }
    }
}
