//! Typewriter reveal of the question text

use serde::{Deserialize, Serialize};

/// Default question
pub const PROMPT_TEXT: &str = "will you be my valentine?";

/// A fixed string revealed one character per tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedPrompt {
    full: String,
    /// Byte offset of the revealed prefix (always on a char boundary)
    revealed: usize,
}

impl TypedPrompt {
    pub fn new(full: impl Into<String>) -> Self {
        Self {
            full: full.into(),
            revealed: 0,
        }
    }

    /// Reveal the next character. Returns true on the tick that completes
    /// the reveal; once complete, further calls change nothing.
    pub fn advance(&mut self) -> bool {
        let Some(next) = self.full[self.revealed..].chars().next() else {
            return false;
        };
        self.revealed += next.len_utf8();
        self.is_complete()
    }

    /// Currently shown prefix
    pub fn text(&self) -> &str {
        &self.full[..self.revealed]
    }

    pub fn is_complete(&self) -> bool {
        self.revealed == self.full.len()
    }

    /// Caret blinks while typing
    pub fn caret_visible(&self) -> bool {
        !self.is_complete()
    }

    /// Ticks needed to reveal everything
    pub fn len_chars(&self) -> usize {
        self.full.chars().count()
    }
}
