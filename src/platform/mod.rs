//! Platform bindings
//!
//! The browser host owns the canvas, pointer events and the animation
//! frame loop; it drives the game through `wasm::WasmGame`.

#[cfg(target_arch = "wasm32")]
pub mod wasm;
