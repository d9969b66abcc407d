//! Browser bindings
//!
//! The page owns rendering and the animation frame loop. It forwards pointer
//! events and elapsed time here and reads back JSON events and snapshots.

use wasm_bindgen::prelude::*;

use super::FrameClock;
use crate::settings::Settings;
use crate::sim::{Element, PointerInput, PointerKind, Session, handle_input, tick};

#[wasm_bindgen(start)]
pub fn start() {
    super::init_logging();
    log::info!("Heartpop (web) loaded");
}

/// A session handle exposed to JavaScript
#[wasm_bindgen]
pub struct WebSession {
    inner: Session,
    clock: FrameClock,
}

#[wasm_bindgen]
impl WebSession {
    /// Fresh session seeded from the clock, with stored settings
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebSession {
        let seed = super::wall_clock_ms();
        log::info!("Starting session with seed: {}", seed);
        WebSession {
            inner: Session::with_settings(Settings::load(), seed),
            clock: FrameClock::new(),
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.inner.resize(width, height);
    }

    /// Feed a `requestAnimationFrame` timestamp
    pub fn frame(&mut self, time: f64) {
        let dt = self.clock.advance(time);
        tick(&mut self.inner, dt);
    }

    /// `kind` is "pointer_down", "pointer_enter" or "touch_start";
    /// `element` is "target", "confirm" or "decline"
    pub fn input(&mut self, kind: &str, element: &str, id: u32) -> bool {
        let kind = match kind {
            "pointer_down" => PointerKind::PointerDown,
            "pointer_enter" => PointerKind::PointerEnter,
            "touch_start" => PointerKind::TouchStart,
            other => {
                log::warn!("Unknown input kind: {}", other);
                return false;
            }
        };
        let element = match element {
            "target" => Element::Target(id),
            "confirm" => Element::ConfirmButton,
            "decline" => Element::DeclineButton,
            other => {
                log::warn!("Unknown element: {}", other);
                return false;
            }
        };
        handle_input(&mut self.inner, &PointerInput::new(kind, element))
    }

    /// Events since the last call, as a JSON array
    pub fn events(&mut self) -> String {
        serde_json::to_string(&self.inner.drain_events()).unwrap_or_else(|e| {
            log::error!("Failed to serialize events: {}", e);
            "[]".to_string()
        })
    }

    /// Current snapshot as JSON
    pub fn snapshot(&self) -> String {
        serde_json::to_string(&self.inner.snapshot()).unwrap_or_else(|e| {
            log::error!("Failed to serialize snapshot: {}", e);
            "null".to_string()
        })
    }
}

impl Default for WebSession {
    fn default() -> Self {
        Self::new()
    }
}
