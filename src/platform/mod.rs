//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Logger setup
//! - Wall-clock seeding
//! - Frame timestamps to whole simulation milliseconds
//! - Browser bindings (`web`, wasm32 only)

use crate::sim::clock::Millis;

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Longest gap a single frame may advance the simulation (background tabs)
pub const MAX_FRAME_GAP_MS: f64 = 1000.0;

/// Turns fractional frame timestamps into whole-millisecond steps.
///
/// Sub-millisecond remainders carry over to the next frame, so a 60 Hz
/// display (16.667 ms frames) advances the simulation at wall-clock rate.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_time: Option<f64>,
    carry: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whole milliseconds to advance for a frame at `time`. The first frame
    /// only sets the baseline.
    pub fn advance(&mut self, time: f64) -> Millis {
        let dt = match self.last_time {
            Some(last) => (time - last).clamp(0.0, MAX_FRAME_GAP_MS),
            None => 0.0,
        };
        self.last_time = Some(time);
        self.carry += dt;
        let whole = self.carry.floor();
        self.carry -= whole;
        whole as Millis
    }
}

/// Install the logger for this platform
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    // A second init (tests, embedding) is harmless
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Milliseconds since the Unix epoch, for seeding a fresh session
#[cfg(not(target_arch = "wasm32"))]
pub fn wall_clock_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(target_arch = "wasm32")]
pub fn wall_clock_ms() -> u64 {
    js_sys::Date::now() as u64
}
