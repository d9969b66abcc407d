//! The decline button that runs away
//!
//! Each interaction attempt moves the button to a random spot inside the
//! padded viewport, up to a fixed number of dodges. The attempt after that
//! removes it for good and shows a short-lived acknowledgement instead.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rng::RandomSource;

/// Dodges before the button gives up
pub const MAX_DODGES: u32 = 2;
/// Distance kept from the viewport edges (px)
pub const EDGE_PADDING: f32 = 70.0;
/// Acknowledgement offset from the button's last position (px)
pub const ACK_OFFSET_X: f32 = 10.0;

/// Host viewport size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Uniform point inside the viewport shrunk by `padding` on every edge.
    /// An axis narrower than twice the padding collapses to its midpoint.
    pub fn random_point(&self, padding: f32, rng: &mut impl RandomSource) -> Vec2 {
        let x = padded_axis(self.width, padding, rng);
        let y = padded_axis(self.height, padding, rng);
        Vec2::new(x, y)
    }
}

fn padded_axis(extent: f32, padding: f32, rng: &mut impl RandomSource) -> f32 {
    let span = extent - padding * 2.0;
    if span <= 0.0 {
        extent / 2.0
    } else {
        padding + rng.next_unit() * span
    }
}

/// Where the button is in its life
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EvasionPhase {
    /// In its original slot next to the confirm button
    Stationary,
    /// Floating at a random position
    Evading,
    /// Gone for good
    Disengaged,
}

/// Result of an interaction attempt
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DodgeOutcome {
    /// Jumped to a new position
    Moved(Vec2),
    /// Gave up; the acknowledgement is now showing
    Disengaged,
    /// Button no longer interactive
    Ignored,
}

/// Decline button state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeclineButton {
    dodges: u32,
    max_dodges: u32,
    position: Option<Vec2>,
    phase: EvasionPhase,
    acknowledgement: bool,
}

impl Default for DeclineButton {
    fn default() -> Self {
        Self::new(MAX_DODGES)
    }
}

impl DeclineButton {
    pub fn new(max_dodges: u32) -> Self {
        Self {
            dodges: 0,
            max_dodges,
            position: None,
            phase: EvasionPhase::Stationary,
            acknowledgement: false,
        }
    }

    /// Handle a hover/touch on the button
    pub fn attempt_interact(
        &mut self,
        viewport: &Viewport,
        padding: f32,
        rng: &mut impl RandomSource,
    ) -> DodgeOutcome {
        match self.phase {
            EvasionPhase::Disengaged => DodgeOutcome::Ignored,
            _ if self.dodges >= self.max_dodges => {
                self.phase = EvasionPhase::Disengaged;
                self.acknowledgement = true;
                DodgeOutcome::Disengaged
            }
            _ => {
                let pos = viewport.random_point(padding, rng);
                self.dodges += 1;
                self.position = Some(pos);
                self.phase = EvasionPhase::Evading;
                DodgeOutcome::Moved(pos)
            }
        }
    }

    /// Hide the acknowledgement. Returns false if it wasn't showing.
    pub fn hide_acknowledgement(&mut self) -> bool {
        std::mem::replace(&mut self.acknowledgement, false)
    }

    pub fn dodges(&self) -> u32 {
        self.dodges
    }

    pub fn phase(&self) -> EvasionPhase {
        self.phase
    }

    /// Last position it jumped to; `None` while still in its slot
    pub fn position(&self) -> Option<Vec2> {
        self.position
    }

    /// Whether the button can still receive input
    pub fn is_interactive(&self) -> bool {
        self.phase != EvasionPhase::Disengaged
    }

    pub fn acknowledgement_visible(&self) -> bool {
        self.acknowledgement
    }

    /// Where the acknowledgement is drawn, while it is showing
    pub fn acknowledgement_anchor(&self) -> Option<Vec2> {
        if !self.acknowledgement {
            return None;
        }
        self.position.map(|p| p + Vec2::new(ACK_OFFSET_X, 0.0))
    }
}
