//! The four acts of a session

use serde::{Deserialize, Serialize};

use super::clock::Millis;

/// Which act is on screen. Ordering follows the show: acts only ever move
/// forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Act {
    /// Pop all the heart balloons
    Balloons,
    /// Inert gap while the balloons fade out
    Pause,
    /// Typed question with yes/decline buttons
    Question,
    /// Celebration, terminal
    Finale,
}

impl Act {
    pub fn as_str(&self) -> &'static str {
        match self {
            Act::Balloons => "balloons",
            Act::Pause => "pause",
            Act::Question => "question",
            Act::Finale => "finale",
        }
    }

    /// Fade-in duration handed to the renderer when the act mounts
    pub fn enter_ms(&self) -> Millis {
        match self {
            Act::Balloons => 0,
            Act::Pause => 400,
            Act::Question => 700,
            Act::Finale => 1000,
        }
    }

    /// Fade-out duration handed to the renderer when the act unmounts
    pub fn exit_ms(&self) -> Millis {
        match self {
            Act::Balloons => 500,
            Act::Pause => 400,
            Act::Question => 700,
            Act::Finale => 0,
        }
    }

    /// No transition leaves the finale
    pub fn is_terminal(&self) -> bool {
        matches!(self, Act::Finale)
    }
}

impl std::fmt::Display for Act {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acts_are_ordered() {
        assert!(Act::Balloons < Act::Pause);
        assert!(Act::Pause < Act::Question);
        assert!(Act::Question < Act::Finale);
    }

    #[test]
    fn test_only_finale_is_terminal() {
        assert!(Act::Finale.is_terminal());
        assert!(!Act::Balloons.is_terminal());
        assert!(!Act::Question.is_terminal());
    }

    #[test]
    fn test_display() {
        assert_eq!(Act::Question.to_string(), "question");
    }
}
