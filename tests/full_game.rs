use lane_thirty::consts::*;
use lane_thirty::sim::{
    GamePhase, GameState, RenderState, Snapshot, TickInput, frame_is_strike, tick,
};
use lane_thirty::{PlayMode, Settings, Ticker, lane_center_x};

const MAX_TICKS: u32 = 60 * 60 * 10;

/// Bowl a whole game with real physics, aiming at the given offsets in turn
fn play_game(settings: &Settings, offsets: &[f32], frame_ms: f64) -> GameState {
    let mut state = GameState::with_settings(settings);
    let mut ticker = Ticker::new();
    let mut now = 0.0;
    let mut throw = 0usize;
    let center = lane_center_x(&state.lane);

    for _ in 0..MAX_TICKS {
        now += frame_ms;
        let elapsed = ticker.tick_interval(now) as f32;

        let mut input = TickInput::default();
        match state.phase {
            GamePhase::Initialized | GamePhase::NotRunning => {
                input.aim_x = Some(center + offsets[throw % offsets.len()]);
                input.release = true;
                throw += 1;
            }
            GamePhase::Running if state.ready_for_return => input.release = true,
            GamePhase::Over => return state,
            _ => {}
        }
        tick(&mut state, &input, elapsed);
    }

    panic!("game did not finish");
}

fn assert_consistent(state: &GameState) {
    let card = &state.scorecard;
    assert_eq!(state.phase, GamePhase::Over);
    assert_eq!(state.render_state, RenderState::Over);
    assert!(card.is_game_over());
    assert!(card.frames.iter().all(|f| f.roll1.is_some()));

    for f in card.frames.iter().take(FRAME_COUNT - 1) {
        let pins = f.roll1.unwrap_or(0) + f.roll2.unwrap_or(0);
        assert!(pins <= 10, "frame knocked down {pins} pins");
        if frame_is_strike(f) {
            assert_eq!(f.roll2, None);
        } else {
            assert!(f.roll2.is_some());
        }
    }

    let totals: Vec<u32> = card.frames.iter().filter_map(|f| f.cumulative).collect();
    assert_eq!(totals.len(), FRAME_COUNT);
    assert!(totals.windows(2).all(|w| w[0] <= w[1]));
    assert!(card.total() <= 300);
}

#[test]
fn standard_game_runs_to_completion() {
    let state = play_game(&Settings::default(), &[0.0, -40.0, 30.0, 80.0], 1000.0 / 60.0);
    assert_consistent(&state);
}

#[test]
fn gutter_balls_score_zero() {
    // Wide lane so a ball hugging the left edge passes outside the back row
    let mut settings = Settings::default();
    settings.lane.width = 600.0;
    let state = play_game(&settings, &[-1000.0], 1000.0 / 60.0);
    assert_consistent(&state);
    assert_eq!(state.scorecard.total(), 0);
}

#[test]
fn uneven_frame_rate_still_completes() {
    let state = play_game(&Settings::default(), &[0.0, 20.0], 33.0);
    assert_consistent(&state);
}

#[test]
fn oscillating_game_runs_to_completion() {
    let settings = Settings::with_mode(PlayMode::Oscillating);
    let state = play_game(&settings, &[0.0, -50.0, 50.0], 1000.0 / 60.0);
    assert_consistent(&state);
}

#[test]
fn restart_after_game_over() {
    let mut state = play_game(&Settings::default(), &[0.0], 1000.0 / 60.0);

    tick(
        &mut state,
        &TickInput {
            release: true,
            ..Default::default()
        },
        REFERENCE_INTERVAL_MS,
    );

    assert_eq!(state.phase, GamePhase::NotRunning);
    assert_eq!(state.scorecard.current_frame, 0);
    let snapshot = Snapshot::capture(&state);
    assert_eq!(snapshot.pins.len(), PIN_COUNT);
    assert!(snapshot.frames.iter().all(|f| f.roll1.is_none()));
}
