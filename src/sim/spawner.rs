//! Time-driven enemy spawning
//!
//! Spawns follow wall-clock time, not tick count, so the cadence is the
//! same at any frame rate.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{Enemy, EnemyKind, Field};
use crate::tuning::Tuning;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spawner {
    /// Milliseconds between spawns
    pub interval_ms: f64,
    /// Timestamp of the next spawn; `None` until armed
    next_at: Option<f64>,
}

impl Spawner {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            next_at: None,
        }
    }

    /// Start the cadence; the first enemy appears one interval after `now_ms`
    pub fn arm(&mut self, now_ms: f64) {
        self.next_at = Some(now_ms + self.interval_ms);
    }

    /// Timestamp of the next scheduled spawn
    pub fn next_spawn_at(&self) -> Option<f64> {
        self.next_at
    }

    /// Produce an enemy if the cadence has elapsed.
    ///
    /// At most one enemy per call; a late call re-arms from `now_ms`
    /// instead of bursting to catch up.
    pub fn tick(
        &mut self,
        now_ms: f64,
        field: Field,
        tuning: &Tuning,
        rng: &mut impl Rng,
    ) -> Option<Enemy> {
        let due = self.next_at?;
        if now_ms < due {
            return None;
        }
        self.next_at = Some(now_ms + self.interval_ms);
        Some(roll_enemy(field, tuning, rng))
    }
}

/// Pick a variant and a uniform position inside the field
pub fn roll_enemy(field: Field, tuning: &Tuning, rng: &mut impl Rng) -> Enemy {
    let kind = if rng.random_bool(tuning.heavy_chance) {
        EnemyKind::Heavy
    } else {
        EnemyKind::Light
    };
    let pos = Vec2::new(
        rng.random::<f32>() * field.width,
        rng.random::<f32>() * field.height,
    );
    Enemy::new(kind, pos, tuning)
}
