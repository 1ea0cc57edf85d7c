//! Browser entry points
//!
//! Gestures are queued and applied on the next animation frame, after the
//! physics step and the autonomous state evaluation.

use wasm_bindgen::prelude::*;

use crate::settings::Settings;
use crate::sim::{GameState, Snapshot, TickInput, tick};
use crate::ticker::Ticker;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        // Logger already installed by an earlier instance
        return;
    }
    log::info!("Lane Thirty starting...");
}

/// Game instance owned by the page
#[wasm_bindgen]
pub struct WasmGame {
    state: GameState,
    ticker: Ticker,
    input: TickInput,
}

#[wasm_bindgen]
impl WasmGame {
    /// Create a game from optional settings JSON
    #[wasm_bindgen(constructor)]
    pub fn new(settings_json: Option<String>) -> WasmGame {
        let settings = Settings::load_or_default(settings_json.as_deref());
        WasmGame {
            state: GameState::with_settings(&settings),
            ticker: Ticker::new(),
            input: TickInput::default(),
        }
    }

    /// Advance to `timestamp` (ms, from requestAnimationFrame) and return the
    /// render snapshot as JSON
    pub fn frame(&mut self, timestamp: f64) -> String {
        let elapsed = self.ticker.tick_interval(timestamp) as f32;
        let input = std::mem::take(&mut self.input);
        tick(&mut self.state, &input, elapsed);
        self.snapshot()
    }

    /// Pointer moved; x in lane coordinates
    pub fn aim_move(&mut self, pointer_x: f32) {
        self.input.aim_x = Some(pointer_x);
    }

    /// Pointer released / tapped
    pub fn release(&mut self) {
        self.input.release = true;
    }

    /// Current render snapshot as JSON
    pub fn snapshot(&self) -> String {
        match Snapshot::capture(&self.state).to_json() {
            Ok(json) => json,
            Err(e) => {
                log::error!("Snapshot serialization failed: {}", e);
                String::new()
            }
        }
    }
}
