//! Simulated clock and timer queue
//!
//! Time is an abstract millisecond counter advanced only by the host. Timers
//! belong to a [`Scope`]; releasing a scope cancels every timer it owns, which
//! is how a view's pending callbacks die with the view.

use serde::{Deserialize, Serialize};

/// Time in milliseconds since session start
pub type Millis = u64;

/// Handle for cancelling a single timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerId(u64);

/// Lifetime owner of a group of timers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Scope(u32);

impl Scope {
    /// Scope that lives as long as the session
    pub const ROOT: Scope = Scope(0);

    /// The scope that follows this one
    pub fn next(self) -> Scope {
        Scope(self.0.wrapping_add(1).max(1))
    }
}

#[derive(Debug, Clone)]
struct Pending<E> {
    id: TimerId,
    due: Millis,
    scope: Scope,
    /// Repeat interval for interval timers
    every: Option<Millis>,
    event: E,
}

/// A timer that came due
#[derive(Debug, Clone, PartialEq)]
pub struct Fired<E> {
    pub id: TimerId,
    pub at: Millis,
    pub scope: Scope,
    pub event: E,
}

/// Pending timers ordered by due time, then by scheduling order
#[derive(Debug, Clone)]
pub struct TimerQueue<E> {
    now: Millis,
    next_id: u64,
    pending: Vec<Pending<E>>,
}

impl<E> Default for TimerQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> TimerQueue<E> {
    pub fn new() -> Self {
        Self {
            now: 0,
            next_id: 1,
            pending: Vec::new(),
        }
    }

    /// Current simulated time
    pub fn now(&self) -> Millis {
        self.now
    }

    /// Number of timers still waiting
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Schedule a one-shot timer `delay` ms from now
    pub fn schedule(&mut self, scope: Scope, delay: Millis, event: E) -> TimerId {
        self.push(scope, delay, None, event)
    }

    /// Schedule a timer that first fires after `every` ms and then repeats
    /// until cancelled. A zero interval is bumped to 1 ms so the queue
    /// always makes progress.
    pub fn schedule_every(&mut self, scope: Scope, every: Millis, event: E) -> TimerId {
        let every = every.max(1);
        self.push(scope, every, Some(every), event)
    }

    fn push(&mut self, scope: Scope, delay: Millis, every: Option<Millis>, event: E) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push(Pending {
            id,
            due: self.now.saturating_add(delay),
            scope,
            every,
            event,
        });
        id
    }

    /// Cancel one timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.id != id);
        self.pending.len() != before
    }

    /// Cancel every timer owned by `scope`, returning how many were dropped
    pub fn release(&mut self, scope: Scope) -> usize {
        let before = self.pending.len();
        self.pending.retain(|p| p.scope != scope);
        before - self.pending.len()
    }

    /// Whether a timer is still pending
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.iter().any(|p| p.id == id)
    }

    /// Time of the next due timer, if any
    pub fn next_due(&self) -> Option<Millis> {
        self.pending.iter().map(|p| p.due).min()
    }

    /// Move the clock forward without firing anything.
    ///
    /// Callers drain with [`TimerQueue::pop_due`] first; the clock never
    /// moves backwards.
    pub fn advance_to(&mut self, until: Millis) {
        self.now = self.now.max(until);
    }
}

impl<E: Clone> TimerQueue<E> {
    /// Remove and return the earliest timer due at or before `until`,
    /// moving the clock to its due time. Interval timers are re-armed.
    pub fn pop_due(&mut self, until: Millis) -> Option<Fired<E>> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due <= until)
            .min_by_key(|(_, p)| (p.due, p.id))
            .map(|(i, _)| i)?;

        let due = self.pending[index].due;
        self.now = self.now.max(due);

        let fired = match self.pending[index].every {
            Some(every) => {
                let timer = &mut self.pending[index];
                timer.due = due.saturating_add(every);
                Fired {
                    id: timer.id,
                    at: due,
                    scope: timer.scope,
                    event: timer.event.clone(),
                }
            }
            None => {
                let timer = self.pending.remove(index);
                Fired {
                    id: timer.id,
                    at: due,
                    scope: timer.scope,
                    event: timer.event,
                }
            }
        };
        Some(fired)
    }
}
