//! Heart balloons and pop tracking
//!
//! A [`TargetField`] owns the targets of the balloons act. Popping is logical
//! and immediate; the popped balloon stays in the render set until
//! [`TargetField::remove`] is called after its exit animation.

use std::collections::BTreeSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::clock::Millis;
use super::rng::RandomSource;

/// Number of balloons in a session
pub const TARGET_COUNT: usize = 8;

/// Base layout in percent of the viewport
pub const TARGET_LAYOUT: [(f32, f32); TARGET_COUNT] = [
    (10.0, 18.0),
    (74.0, 12.0),
    (32.0, 42.0),
    (85.0, 48.0),
    (15.0, 62.0),
    (55.0, 22.0),
    (62.0, 65.0),
    (40.0, 80.0),
];

/// Horizontal jitter half-width (percent)
pub const JITTER_X: f32 = 3.0;
/// Vertical jitter half-width (percent)
pub const JITTER_Y: f32 = 2.0;
/// Balloon size range (px)
pub const SIZE_MIN: f32 = 60.0;
pub const SIZE_MAX: f32 = 90.0;
/// Stagger between balloon entrances
pub const APPEAR_STAGGER: Millis = 120;

/// One poppable balloon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub id: u32,
    /// Position in percent of the viewport
    pub pos: Vec2,
    pub size: f32,
    /// Entrance delay from act start
    pub delay: Millis,
    pub popped: bool,
}

/// Result of a pop input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopOutcome {
    /// Unknown id, or already popped
    Ignored,
    /// Popped, others remain
    Popped { remaining: usize },
    /// Popped the last one. Reported exactly once per field.
    Cleared,
}

/// The balloons act's targets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetField {
    /// Targets still rendered (popped ones linger until removed)
    targets: Vec<Target>,
    /// Ids not yet popped
    unpopped: BTreeSet<u32>,
    /// Whether [`PopOutcome::Cleared`] has been reported
    cleared: bool,
    /// "pop them all" hint, hidden on first pop
    hint_visible: bool,
}

impl TargetField {
    /// Lay out the standard eight balloons with jitter
    pub fn generate(rng: &mut impl RandomSource) -> Self {
        let targets = TARGET_LAYOUT
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| Target {
                id: i as u32,
                pos: Vec2::new(
                    x + rng.range(-JITTER_X, JITTER_X),
                    y + rng.range(-JITTER_Y, JITTER_Y),
                ),
                size: rng.range(SIZE_MIN, SIZE_MAX),
                delay: i as Millis * APPEAR_STAGGER,
                popped: false,
            })
            .collect();
        Self::from_targets(targets)
    }

    /// Build a field from explicit targets. Targets already marked popped
    /// don't count towards the remaining set.
    pub fn from_targets(targets: Vec<Target>) -> Self {
        let unpopped = targets.iter().filter(|t| !t.popped).map(|t| t.id).collect();
        Self {
            targets,
            unpopped,
            cleared: false,
            hint_visible: true,
        }
    }

    /// Pop a target. Duplicate or unknown ids are no-ops.
    pub fn pop(&mut self, id: u32) -> PopOutcome {
        if !self.unpopped.remove(&id) {
            log::debug!("Ignoring pop for target {} (not poppable)", id);
            return PopOutcome::Ignored;
        }
        if let Some(target) = self.targets.iter_mut().find(|t| t.id == id) {
            target.popped = true;
        }
        self.hint_visible = false;

        if self.unpopped.is_empty() {
            self.take_cleared()
        } else {
            PopOutcome::Popped {
                remaining: self.unpopped.len(),
            }
        }
    }

    /// Report completion if every target is popped and it hasn't been
    /// reported yet. An empty field is cleared from the start.
    pub fn take_cleared(&mut self) -> PopOutcome {
        if self.unpopped.is_empty() && !self.cleared {
            self.cleared = true;
            PopOutcome::Cleared
        } else {
            PopOutcome::Ignored
        }
    }

    /// Drop a popped target from the render set. Unpopped targets stay.
    pub fn remove(&mut self, id: u32) -> bool {
        let before = self.targets.len();
        self.targets.retain(|t| !(t.id == id && t.popped));
        self.targets.len() != before
    }

    /// Targets still on screen, popped or not
    pub fn visible(&self) -> &[Target] {
        &self.targets
    }

    /// Targets that can still be popped
    pub fn remaining(&self) -> usize {
        self.unpopped.len()
    }

    pub fn is_cleared(&self) -> bool {
        self.unpopped.is_empty()
    }

    pub fn hint_visible(&self) -> bool {
        self.hint_visible
    }

    pub fn get(&self, id: u32) -> Option<&Target> {
        self.targets.iter().find(|t| t.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::{RngState, ScriptedSource};
    use proptest::prelude::*;

    #[test]
    fn test_generate_layout_with_scripted_jitter() {
        // 0.5 lands every jitter at zero and every size at the midpoint
        let mut rng = ScriptedSource::constant(0.5);
        let field = TargetField::generate(&mut rng);

        assert_eq!(field.visible().len(), TARGET_COUNT);
        assert_eq!(field.remaining(), TARGET_COUNT);
        for (i, target) in field.visible().iter().enumerate() {
            let (x, y) = TARGET_LAYOUT[i];
            assert_eq!(target.id, i as u32);
            assert_eq!(target.pos, Vec2::new(x, y));
            assert_eq!(target.size, 75.0);
            assert_eq!(target.delay, i as u64 * 120);
            assert!(!target.popped);
        }
        assert_eq!(rng.draws(), TARGET_COUNT * 3);
    }

    #[test]
    fn test_generate_jitter_is_bounded() {
        let mut rng = RngState::new(7).to_rng();
        let field = TargetField::generate(&mut rng);
        for target in field.visible() {
            let (x, y) = TARGET_LAYOUT[target.id as usize];
            assert!((target.pos.x - x).abs() <= JITTER_X);
            assert!((target.pos.y - y).abs() <= JITTER_Y);
            assert!(target.size >= SIZE_MIN && target.size < SIZE_MAX);
        }
    }

    #[test]
    fn test_top_draw_size_stays_below_max() {
        let field = TargetField::generate(&mut ScriptedSource::constant(1.0));
        for target in field.visible() {
            assert!(target.size < SIZE_MAX);
        }
    }

    #[test]
    fn test_pop_counts_down_and_clears_once() {
        let mut field = TargetField::generate(&mut ScriptedSource::constant(0.5));
        for id in 0..7 {
            assert_eq!(
                field.pop(id),
                PopOutcome::Popped {
                    remaining: 7 - id as usize
                }
            );
        }
        assert!(!field.hint_visible());
        assert_eq!(field.pop(7), PopOutcome::Cleared);
        assert_eq!(field.pop(7), PopOutcome::Ignored);
        assert_eq!(field.take_cleared(), PopOutcome::Ignored);
        assert_eq!(field.remaining(), 0);
    }

    #[test]
    fn test_duplicate_pop_is_noop() {
        let mut field = TargetField::generate(&mut ScriptedSource::constant(0.5));
        assert_eq!(field.pop(3), PopOutcome::Popped { remaining: 7 });
        assert_eq!(field.pop(3), PopOutcome::Ignored);
        assert_eq!(field.remaining(), 7);
        assert_eq!(field.pop(99), PopOutcome::Ignored);
    }

    #[test]
    fn test_popped_target_lingers_until_removed() {
        let mut field = TargetField::generate(&mut ScriptedSource::constant(0.5));
        field.pop(2);
        assert!(field.get(2).is_some_and(|t| t.popped));
        assert_eq!(field.visible().len(), 8);

        // Unpopped targets can't be removed
        assert!(!field.remove(4));
        assert!(field.remove(2));
        assert!(!field.remove(2));
        assert_eq!(field.visible().len(), 7);
    }

    #[test]
    fn test_completion_does_not_wait_for_removal() {
        let mut field = TargetField::generate(&mut ScriptedSource::constant(0.5));
        let outcomes: Vec<_> = (0..8).map(|id| field.pop(id)).collect();
        assert_eq!(outcomes.last(), Some(&PopOutcome::Cleared));
        // Nothing removed yet
        assert_eq!(field.visible().len(), 8);
    }

    #[test]
    fn test_empty_field_is_vacuously_cleared() {
        let mut field = TargetField::from_targets(Vec::new());
        assert!(field.is_cleared());
        assert_eq!(field.take_cleared(), PopOutcome::Cleared);
        assert_eq!(field.take_cleared(), PopOutcome::Ignored);
    }

    proptest! {
        #[test]
        fn prop_any_pop_order_clears_exactly_once(
            order in Just((0u32..8).collect::<Vec<_>>()).prop_shuffle(),
            extra in proptest::collection::vec(0u32..10, 0..8),
        ) {
            let mut field = TargetField::generate(&mut ScriptedSource::constant(0.5));
            let mut cleared = 0;
            for id in order.iter().chain(extra.iter()) {
                if field.pop(*id) == PopOutcome::Cleared {
                    cleared += 1;
                }
            }
            prop_assert_eq!(cleared, 1);
            prop_assert_eq!(field.remaining(), 0);
        }
    }
}
