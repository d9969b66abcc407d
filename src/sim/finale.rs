//! Finale scene layout
//!
//! Purely decorative, but laid out once from the session's random source
//! so a seed reproduces the whole show.

use serde::{Deserialize, Serialize};

use super::clock::Millis;
use super::rng::RandomSource;

/// Drifting shapes behind the finale text
pub const AMBIENT_SHAPE_COUNT: usize = 8;
/// Twinkling stars
pub const STAR_COUNT: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeKind {
    Heart,
    Star,
}

/// A shape drifting up the screen on a loop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmbientShape {
    pub id: u32,
    /// Horizontal position in percent
    pub x: f32,
    pub delay: Millis,
    pub duration: Millis,
    pub size: f32,
    pub kind: ShapeKind,
}

/// A star that twinkles in place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sparkle {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub delay: Millis,
    /// Resting tilt in degrees
    pub rotation: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinaleScene {
    pub shapes: Vec<AmbientShape>,
    pub sparkles: Vec<Sparkle>,
    pub second_line_visible: bool,
}

impl FinaleScene {
    pub fn generate(rng: &mut impl RandomSource) -> Self {
        let shapes = (0..AMBIENT_SHAPE_COUNT as u32)
            .map(|id| AmbientShape {
                id,
                x: rng.range(5.0, 95.0),
                delay: rng.range(0.0, 3000.0) as Millis,
                duration: rng.range(8000.0, 14000.0) as Millis,
                size: rng.range(12.0, 24.0),
                kind: if id % 3 == 0 {
                    ShapeKind::Star
                } else {
                    ShapeKind::Heart
                },
            })
            .collect();

        let sparkles = (0..STAR_COUNT as u32)
            .map(|id| {
                let x = rng.range(15.0, 85.0);
                let y = rng.range(20.0, 80.0);
                let size = rng.range(14.0, 26.0);
                let delay = rng.range(0.0, 2000.0) as Millis;
                let sign = if rng.coin() { 1.0 } else { -1.0 };
                Sparkle {
                    id,
                    x,
                    y,
                    size,
                    delay,
                    rotation: sign * rng.range(5.0, 20.0),
                }
            })
            .collect();

        Self {
            shapes,
            sparkles,
            second_line_visible: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::{RngState, ScriptedSource};

    #[test]
    fn test_layout_counts_and_kinds() {
        let scene = FinaleScene::generate(&mut RngState::new(5).to_rng());
        assert_eq!(scene.shapes.len(), AMBIENT_SHAPE_COUNT);
        assert_eq!(scene.sparkles.len(), STAR_COUNT);
        let stars: Vec<u32> = scene
            .shapes
            .iter()
            .filter(|s| s.kind == ShapeKind::Star)
            .map(|s| s.id)
            .collect();
        assert_eq!(stars, vec![0, 3, 6]);
        assert!(!scene.second_line_visible);
    }

    #[test]
    fn test_layout_ranges() {
        let scene = FinaleScene::generate(&mut RngState::new(9).to_rng());
        for shape in &scene.shapes {
            assert!((5.0..95.0).contains(&shape.x));
            assert!(shape.delay < 3000);
            assert!((8000..14000).contains(&shape.duration));
        }
        for sparkle in &scene.sparkles {
            assert!((15.0..85.0).contains(&sparkle.x));
            assert!((20.0..80.0).contains(&sparkle.y));
            assert!((5.0..20.0).contains(&sparkle.rotation.abs()));
        }
    }

    #[test]
    fn test_top_draw_stays_inside_ranges() {
        let scene = FinaleScene::generate(&mut ScriptedSource::constant(1.0));
        for shape in &scene.shapes {
            assert!(shape.x < 95.0);
            assert!(shape.duration < 14000);
            assert!(shape.size < 24.0);
        }
    }

    #[test]
    fn test_scripted_sparkle_tilt() {
        let mut rng = ScriptedSource::constant(0.75);
        let scene = FinaleScene::generate(&mut rng);
        // coin() is true above 0.5, tilt = 5 + 0.75 * 15
        assert_eq!(scene.sparkles[0].rotation, 16.25);
    }
}
