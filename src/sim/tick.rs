//! Input routing and clock advancement
//!
//! The host feeds discrete pointer events and elapsed time. Inputs go to the
//! mounted act only; an element the act doesn't render can't be hit.

use serde::{Deserialize, Serialize};

use super::clock::Millis;
use super::rng::RandomSource;
use super::state::Session;

/// Kind of pointer event delivered by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerKind {
    PointerDown,
    PointerEnter,
    TouchStart,
}

/// Element the event landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Element {
    Target(u32),
    ConfirmButton,
    DeclineButton,
}

/// One input event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerInput {
    pub kind: PointerKind,
    pub element: Element,
}

impl PointerInput {
    pub fn new(kind: PointerKind, element: Element) -> Self {
        Self { kind, element }
    }

    /// Click or tap on a balloon
    pub fn pop(id: u32) -> Self {
        Self::new(PointerKind::PointerDown, Element::Target(id))
    }

    /// Mouse drifting onto the decline button
    pub fn hover_decline() -> Self {
        Self::new(PointerKind::PointerEnter, Element::DeclineButton)
    }

    pub fn confirm() -> Self {
        Self::new(PointerKind::PointerDown, Element::ConfirmButton)
    }
}

/// Deliver one input. Returns true if it changed anything.
pub fn handle_input<R: RandomSource>(session: &mut Session<R>, input: &PointerInput) -> bool {
    use PointerKind::*;

    let handled = match (input.element, input.kind) {
        (Element::Target(id), PointerDown | TouchStart) => session.pop(id),
        (Element::DeclineButton, PointerEnter | TouchStart) => session.attempt_decline(),
        (Element::ConfirmButton, PointerDown | TouchStart) => session.confirm(),
        _ => false,
    };
    if !handled {
        log::debug!("Unhandled {:?} during {}", input, session.act());
    }
    handled
}

/// Advance the session clock by `dt`, firing every timer that comes due
pub fn tick<R: RandomSource>(session: &mut Session<R>, dt: Millis) {
    let until = session.now().saturating_add(dt);
    while let Some(fired) = session.timers.pop_due(until) {
        session.fire(fired);
    }
    session.timers.advance_to(until);
}

/// Advance until nothing is left to fire or `limit` ms have passed.
/// Returns the time actually advanced.
pub fn run_until_idle<R: RandomSource>(session: &mut Session<R>, limit: Millis) -> Millis {
    let start = session.now();
    let deadline = start.saturating_add(limit);
    while let Some(due) = session.timers.next_due() {
        if due > deadline {
            break;
        }
        tick(session, due - session.now());
    }
    session.now() - start
}
