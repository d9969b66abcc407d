//! View state of the question act

use serde::{Deserialize, Serialize};

use super::clock::TimerId;
use super::evasive::DeclineButton;
use super::prompt::TypedPrompt;

/// Typed question, decorations, and the two buttons
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionScene {
    pub prompt: TypedPrompt,
    pub decline: DeclineButton,
    pub decorations_visible: bool,
    pub buttons_visible: bool,
    /// Interval driving the typewriter; cleared once typing completes
    #[serde(skip)]
    pub(crate) typing_timer: Option<TimerId>,
}

impl QuestionScene {
    pub fn new(prompt: TypedPrompt, decline: DeclineButton) -> Self {
        Self {
            prompt,
            decline,
            decorations_visible: false,
            buttons_visible: false,
            typing_timer: None,
        }
    }

    /// Confirm and decline only respond once the buttons are up
    pub fn accepts_buttons(&self) -> bool {
        self.buttons_visible
    }

    /// Whether the decline control is on screen and interactive
    pub fn decline_reachable(&self) -> bool {
        self.buttons_visible && self.decline.is_interactive()
    }

    pub fn is_typing(&self) -> bool {
        self.typing_timer.is_some()
    }
}
