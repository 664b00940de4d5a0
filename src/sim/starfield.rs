//! Parallax starfield behind the arena
//!
//! Purely decorative: stars fall at their depth speed and wrap to the top.

use glam::Vec2;
use rand::Rng;

use super::state::Field;
use crate::consts::{STAR_MAX_DEPTH, STAR_MIN_DEPTH};

/// A background star
#[derive(Debug, Clone, Copy)]
pub struct Star {
    pub pos: Vec2,
    /// Fall speed per tick, also the drawn size
    pub depth: f32,
}

#[derive(Debug, Clone, Default)]
pub struct Starfield {
    pub stars: Vec<Star>,
}

impl Starfield {
    /// Scatter `count` stars uniformly over the field
    pub fn new(count: usize, field: Field, rng: &mut impl Rng) -> Self {
        let stars = (0..count)
            .map(|_| Star {
                pos: Vec2::new(
                    rng.random::<f32>() * field.width,
                    rng.random::<f32>() * field.height,
                ),
                depth: STAR_MIN_DEPTH + rng.random::<f32>() * (STAR_MAX_DEPTH - STAR_MIN_DEPTH),
            })
            .collect();
        Self { stars }
    }

    /// Advance one tick; stars below the bottom edge wrap to the top
    pub fn update(&mut self, field: Field) {
        for star in &mut self.stars {
            star.pos.y += star.depth;
            if star.pos.y > field.height {
                star.pos.y = 0.0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_stars_within_field_and_depth_range() {
        let mut rng = Pcg32::seed_from_u64(3);
        let field = Field::new(640.0, 480.0);
        let sf = Starfield::new(120, field, &mut rng);
        assert_eq!(sf.stars.len(), 120);
        for s in &sf.stars {
            assert!(field.contains(s.pos));
            assert!(s.depth >= STAR_MIN_DEPTH && s.depth < STAR_MAX_DEPTH);
        }
    }

    #[test]
    fn test_star_wraps_to_top_keeping_x() {
        let field = Field::new(100.0, 100.0);
        let mut sf = Starfield {
            stars: vec![Star {
                pos: Vec2::new(42.0, 99.0),
                depth: 2.0,
            }],
        };
        sf.update(field);
        assert_eq!(sf.stars[0].pos, Vec2::new(42.0, 0.0));

        sf.update(field);
        assert_eq!(sf.stars[0].pos, Vec2::new(42.0, 2.0));
    }
}
