//! Deterministic session core
//!
//! All interaction logic lives here. This module must stay pure and
//! deterministic:
//! - Simulated clock only, advanced by the host
//! - Randomness only through `RandomSource`
//! - No rendering or platform dependencies

pub mod act;
pub mod clock;
pub mod evasive;
pub mod finale;
pub mod prompt;
pub mod question;
pub mod rng;
pub mod state;
pub mod targets;
pub mod tick;

pub use act::Act;
pub use clock::{Millis, Scope, TimerId, TimerQueue};
pub use evasive::{DeclineButton, DodgeOutcome, EDGE_PADDING, EvasionPhase, MAX_DODGES, Viewport};
pub use finale::{AmbientShape, FinaleScene, ShapeKind, Sparkle};
pub use prompt::{PROMPT_TEXT, TypedPrompt};
pub use question::QuestionScene;
pub use rng::{RandomSource, RngState, ScriptedSource};
pub use state::{PromptView, Session, SessionEvent, SessionSnapshot, Stage};
pub use targets::{PopOutcome, TARGET_COUNT, Target, TargetField};
pub use tick::{Element, PointerInput, PointerKind, handle_input, run_until_idle, tick};
