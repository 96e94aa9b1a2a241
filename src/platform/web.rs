//! Browser host bindings
//!
//! The page owns rendering and input capture. It forwards pointer events and
//! one `tick` per animation frame, then reads `snapshot_json` to draw.

use wasm_bindgen::prelude::*;

use crate::hud;
use crate::settings::GameConfig;
use crate::sim::{self, GameState, TickInput, Viewport};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");
    log::info!("Noodle Pull core loaded");
}

fn to_js(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// One dough session, owned by the page
#[wasm_bindgen]
pub struct WebSession {
    state: GameState,
    input: TickInput,
}

#[wasm_bindgen]
impl WebSession {
    /// `config_json` may be empty for defaults
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32, config_json: &str) -> Result<WebSession, JsValue> {
        let config = if config_json.trim().is_empty() {
            GameConfig::default()
        } else {
            GameConfig::from_json(config_json).map_err(to_js)?
        };
        let state = GameState::new(config, Viewport { width, height }).map_err(to_js)?;
        log::info!("Session started ({width}x{height})");
        Ok(Self {
            state,
            input: TickInput::default(),
        })
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        sim::pointer_down(&mut self.state, glam::Vec2::new(x, y));
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        sim::pointer_move(&mut self.state, glam::Vec2::new(x, y));
    }

    /// Also call when the pointer leaves the canvas
    pub fn pointer_up(&mut self) {
        sim::pointer_up(&mut self.state);
    }

    /// Queue a skip for the next tick
    pub fn skip_stage(&mut self) {
        self.input.skip_stage = true;
    }

    /// Queue a viewport change for the next tick
    pub fn resize(&mut self, width: f32, height: f32) {
        self.input.viewport = Some((width, height));
    }

    pub fn tick(&mut self) {
        let input = std::mem::take(&mut self.input);
        sim::tick(&mut self.state, &input);
    }

    pub fn completed_count(&self) -> f64 {
        self.state.counters.completed_count as f64
    }

    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&hud::snapshot(&self.state)).map_err(to_js)
    }

    pub fn drain_events_json(&mut self) -> Result<String, JsValue> {
        serde_json::to_string(&self.state.drain_events()).map_err(to_js)
    }
}
