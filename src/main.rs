//! Lane Thirty entry point
//!
//! The browser build is driven from JavaScript through `platform::wasm`.
//! Natively this runs a headless autoplay game with seeded aim and jittered
//! frame timing, then prints the scorecard.
//!
//! Usage: `lane-thirty [standard|oscillating] [seed]`

#[cfg(not(target_arch = "wasm32"))]
mod autoplay {
    use lane_thirty::sim::{
        Frame, GamePhase, GameState, TickInput, frame_is_spare, frame_is_strike,
        ten_second_is_spare, tick,
    };
    use lane_thirty::{PlayMode, Settings, Ticker, lane_center_x};
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    /// Hard stop in case a throw never settles
    const MAX_TICKS: u32 = 60 * 60 * 10;
    /// Aim spread either side of the lane center
    const AIM_SPREAD: f32 = 60.0;

    pub fn run(mode: PlayMode, seed: u64) -> Option<GameState> {
        let mut state = GameState::with_settings(&Settings::with_mode(mode));
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut ticker = Ticker::new();
        let mut now = 0.0f64;
        let center = lane_center_x(&state.lane);

        for _ in 0..MAX_TICKS {
            now += rng.random_range(12.0..22.0);
            let elapsed = ticker.tick_interval(now) as f32;

            let mut input = TickInput::default();
            match state.phase {
                GamePhase::Initialized | GamePhase::NotRunning => {
                    input.aim_x = Some(center + rng.random_range(-AIM_SPREAD..AIM_SPREAD));
                    input.release = true;
                }
                GamePhase::Running if state.ready_for_return => input.release = true,
                GamePhase::Over => return Some(state),
                _ => {}
            }

            tick(&mut state, &input, elapsed);
        }

        log::error!("Game did not finish within {} ticks", MAX_TICKS);
        None
    }

    fn mark(pins: Option<u8>) -> String {
        match pins {
            None => " ".to_string(),
            Some(0) => "-".to_string(),
            Some(10) => "X".to_string(),
            Some(n) => n.to_string(),
        }
    }

    /// Classic scoreboard line, e.g. `X | 7/ | 9- | ...`
    pub fn notation(frames: &[Frame]) -> String {
        let last = frames.len() - 1;
        frames
            .iter()
            .enumerate()
            .map(|(i, f)| {
                if i == last {
                    let second = if ten_second_is_spare(f) {
                        "/".to_string()
                    } else {
                        mark(f.roll2)
                    };
                    let third = match (f.roll2, f.roll3) {
                        (Some(r2), Some(r3)) if r2 != 10 && !ten_second_is_spare(f) && r2 + r3 == 10 => {
                            "/".to_string()
                        }
                        _ => mark(f.roll3),
                    };
                    format!("{}{}{}", mark(f.roll1), second, third)
                } else if frame_is_strike(f) {
                    "X ".to_string()
                } else if frame_is_spare(f) {
                    format!("{}/", mark(f.roll1))
                } else {
                    format!("{}{}", mark(f.roll1), mark(f.roll2))
                }
            })
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use lane_thirty::PlayMode;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let mode = args
        .next()
        .and_then(|s| PlayMode::from_str(&s))
        .unwrap_or_default();
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);

    log::info!("Lane Thirty (native autoplay) mode={} seed={}", mode.as_str(), seed);

    let Some(state) = autoplay::run(mode, seed) else {
        std::process::exit(1);
    };

    println!("{}", autoplay::notation(&state.scorecard.frames));
    let totals: Vec<String> = state
        .scorecard
        .frames
        .iter()
        .map(|f| f.cumulative.map(|c| c.to_string()).unwrap_or_default())
        .collect();
    println!("{}", totals.join(" | "));
    println!("Final score: {}", state.scorecard.total());

    match serde_json::to_string(&state.scorecard) {
        Ok(json) => log::debug!("Scorecard: {}", json),
        Err(e) => log::error!("Scorecard serialization failed: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::wasm::wasm_start
}
