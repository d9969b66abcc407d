//! Heartpop - balloon-pop greeting in four acts
//!
//! Core modules:
//! - `sim`: Deterministic session (act sequencing, pop tracking, evasive button, typewriter)
//! - `settings`: Tunable delays and limits
//! - `platform`: Logging setup, wall-clock seed, browser bindings

pub mod error;
pub mod platform;
pub mod settings;
pub mod sim;

pub use error::{HeartpopError, HeartpopResult};
pub use settings::{Settings, Timings};
pub use sim::{Act, Session, SessionEvent, handle_input, tick};

/// Default delays, in milliseconds
pub mod consts {
    /// Balloons cleared -> question mounted
    pub const PAUSE_MS: u64 = 1500;
    /// Pop -> balloon leaves the render set
    pub const POP_REMOVAL_MS: u64 = 450;
    /// Typewriter speed
    pub const TYPE_INTERVAL_MS: u64 = 75;
    /// Typing done -> decorations
    pub const DECORATIONS_DELAY_MS: u64 = 300;
    /// Typing done -> buttons
    pub const BUTTONS_DELAY_MS: u64 = 800;
    /// Decline acknowledgement lifetime
    pub const ACKNOWLEDGEMENT_MS: u64 = 1400;
    /// Finale mount -> second line
    pub const SECOND_LINE_MS: u64 = 2500;
}
