//! Session settings
//!
//! Every delay and limit the show uses, loadable from JSON. Defaults match
//! the constants in [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{HeartpopError, HeartpopResult};
use crate::sim::Viewport;
use crate::sim::clock::Millis;

/// Delays in milliseconds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timings {
    /// Balloons cleared -> question shown
    pub pause_ms: Millis,
    /// Pop -> balloon removed from the render set
    pub pop_removal_ms: Millis,
    /// Typewriter interval per character
    pub type_interval_ms: Millis,
    /// Typing done -> decorations shown
    pub decorations_delay_ms: Millis,
    /// Typing done -> buttons shown
    pub buttons_delay_ms: Millis,
    /// Decline acknowledgement lifetime
    pub acknowledgement_ms: Millis,
    /// Finale mount -> second line shown
    pub second_line_ms: Millis,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            pause_ms: PAUSE_MS,
            pop_removal_ms: POP_REMOVAL_MS,
            type_interval_ms: TYPE_INTERVAL_MS,
            decorations_delay_ms: DECORATIONS_DELAY_MS,
            buttons_delay_ms: BUTTONS_DELAY_MS,
            acknowledgement_ms: ACKNOWLEDGEMENT_MS,
            second_line_ms: SECOND_LINE_MS,
        }
    }
}

/// Session settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub timings: Timings,
    /// Question typed out in the third act
    pub prompt: String,
    /// Dodges before the decline button gives up
    pub max_dodges: u32,
    /// Edge margin for decline button jumps (px)
    pub decline_padding: f32,
    /// Viewport assumed until the host reports one
    pub viewport: Viewport,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timings: Timings::default(),
            prompt: crate::sim::PROMPT_TEXT.to_string(),
            max_dodges: crate::sim::MAX_DODGES,
            decline_padding: crate::sim::EDGE_PADDING,
            viewport: Viewport::default(),
        }
    }
}

impl Settings {
    /// Environment variable naming a settings file (native only)
    pub const PATH_ENV: &'static str = "HEARTPOP_SETTINGS";

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "heartpop_settings";

    /// Parse and validate settings from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> HeartpopResult<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> HeartpopResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> HeartpopResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Reject values the session can't run with
    pub fn validate(&self) -> HeartpopResult<()> {
        if self.timings.type_interval_ms == 0 {
            return Err(HeartpopError::invalid("type_interval_ms must be positive"));
        }
        if self.prompt.is_empty() {
            return Err(HeartpopError::invalid("prompt must not be empty"));
        }
        if !self.decline_padding.is_finite() || self.decline_padding < 0.0 {
            return Err(HeartpopError::invalid(format!(
                "decline_padding must be a non-negative number, got {}",
                self.decline_padding
            )));
        }
        let Viewport { width, height } = self.viewport;
        if !(width.is_finite() && height.is_finite() && width >= 0.0 && height >= 0.0) {
            return Err(HeartpopError::invalid(format!(
                "viewport must have non-negative size, got {}x{}",
                width, height
            )));
        }
        Ok(())
    }

    /// Load settings from the file named by `HEARTPOP_SETTINGS`, falling
    /// back to defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var(Self::PATH_ENV) else {
            log::info!("Using default settings");
            return Self::default();
        };
        match Self::load_from_path(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path);
                settings
            }
            Err(e) => {
                log::warn!("Ignoring settings file {}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let s = Settings::default();
        assert_eq!(s.timings.pause_ms, 1500);
        assert_eq!(s.timings.pop_removal_ms, 450);
        assert_eq!(s.timings.type_interval_ms, 75);
        assert_eq!(s.timings.decorations_delay_ms, 300);
        assert_eq!(s.timings.buttons_delay_ms, 800);
        assert_eq!(s.timings.acknowledgement_ms, 1400);
        assert_eq!(s.max_dodges, 2);
        assert_eq!(s.decline_padding, 70.0);
        assert_eq!(s.prompt, "will you be my valentine?");
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let s = Settings::from_json(r#"{ "timings": { "pause_ms": 10 }, "max_dodges": 5 }"#)
            .unwrap();
        assert_eq!(s.timings.pause_ms, 10);
        assert_eq!(s.timings.type_interval_ms, 75);
        assert_eq!(s.max_dodges, 5);
        assert_eq!(s.prompt, Settings::default().prompt);
    }

    #[test]
    fn test_json_round_trip() {
        let s = Settings::default();
        let back = Settings::from_json(&s.to_json().unwrap()).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = Settings::from_json(r#"{ "timings": { "type_interval_ms": 0 } }"#).unwrap_err();
        assert!(matches!(err, HeartpopError::Invalid(_)));

        let err = Settings::from_json(r#"{ "prompt": "" }"#).unwrap_err();
        assert!(err.to_string().contains("prompt"));

        let err = Settings::from_json(r#"{ "decline_padding": -1.0 }"#).unwrap_err();
        assert!(matches!(err, HeartpopError::Invalid(_)));

        let err = Settings::from_json(r#"{ "viewport": { "width": -10.0, "height": 600.0 } }"#)
            .unwrap_err();
        assert!(err.to_string().contains("viewport"));

        let err = Settings::from_json("not json").unwrap_err();
        assert!(matches!(err, HeartpopError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Settings::load_from_path("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, HeartpopError::Io(_)));
    }
}
