//! Data-driven game balance
//!
//! Every field defaults to the value in [`crate::consts`], so a tuning file
//! only needs the keys it wants to override.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::EnemyKind;

/// Stats for one enemy variant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyStats {
    pub radius: f32,
    pub speed: f32,
    pub hp: u32,
    pub score: u32,
}

/// Stats for one weapon mode
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShotStats {
    pub speed: f32,
    pub radius: f32,
    pub color: u32,
}

/// Balance knobs for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub player_radius: f32,
    pub player_speed: f32,
    pub start_health: u8,
    pub fire_rate_ms: f64,
    pub spawn_interval_ms: f64,
    pub heavy_chance: f64,
    pub heavy: EnemyStats,
    pub light: EnemyStats,
    pub normal_shot: ShotStats,
    pub scatter_shot: ShotStats,
    pub railgun_shot: ShotStats,
    /// Angular offsets of a scatter volley (radians)
    pub scatter_spread: Vec<f32>,
    pub star_count: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_radius: PLAYER_RADIUS,
            player_speed: PLAYER_SPEED,
            start_health: START_HEALTH,
            fire_rate_ms: FIRE_RATE_MS,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            heavy_chance: HEAVY_CHANCE,
            heavy: EnemyStats {
                radius: 24.0,
                speed: 1.0,
                hp: 2,
                score: 30,
            },
            light: EnemyStats {
                radius: 12.0,
                speed: 2.0,
                hp: 1,
                score: 10,
            },
            normal_shot: ShotStats {
                speed: BULLET_SPEED,
                radius: BULLET_RADIUS,
                color: COLOR_NORMAL_SHOT,
            },
            scatter_shot: ShotStats {
                speed: BULLET_SPEED,
                radius: BULLET_RADIUS,
                color: COLOR_SCATTER_SHOT,
            },
            railgun_shot: ShotStats {
                speed: RAILGUN_SPEED,
                radius: RAILGUN_RADIUS,
                color: COLOR_RAILGUN_SHOT,
            },
            scatter_spread: SCATTER_SPREAD.to_vec(),
            star_count: STAR_COUNT,
        }
    }
}

impl Tuning {
    /// Parse a tuning document; missing keys keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut tuning: Self = serde_json::from_str(json)?;
        tuning.sanitize();
        Ok(tuning)
    }

    /// Stats for an enemy variant
    pub fn enemy(&self, kind: EnemyKind) -> EnemyStats {
        match kind {
            EnemyKind::Heavy => self.heavy,
            EnemyKind::Light => self.light,
        }
    }

    /// Clamp values that would break the simulation's invariants
    pub fn sanitize(&mut self) {
        self.heavy_chance = self.heavy_chance.clamp(0.0, 1.0);
        self.heavy.hp = self.heavy.hp.max(1);
        self.light.hp = self.light.hp.max(1);
        self.start_health = self.start_health.max(1);
        if self.scatter_spread.is_empty() {
            log::warn!("Empty scatter spread in tuning, using default");
            self.scatter_spread = SCATTER_SPREAD.to_vec();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_arcade_balance() {
        let t = Tuning::default();
        assert_eq!(t.enemy(EnemyKind::Heavy).hp, 2);
        assert_eq!(t.enemy(EnemyKind::Heavy).score, 30);
        assert_eq!(t.enemy(EnemyKind::Light).hp, 1);
        assert_eq!(t.enemy(EnemyKind::Light).score, 10);
        assert_eq!(t.start_health, 6);
        assert_eq!(t.fire_rate_ms, 200.0);
        assert_eq!(t.spawn_interval_ms, 900.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let t = Tuning::from_json(r#"{ "spawn_interval_ms": 450.0, "heavy_chance": 0.5 }"#)
            .unwrap();
        assert_eq!(t.spawn_interval_ms, 450.0);
        assert_eq!(t.heavy_chance, 0.5);
        assert_eq!(t.fire_rate_ms, FIRE_RATE_MS);
        assert_eq!(t.light, Tuning::default().light);
    }

    #[test]
    fn test_sanitize_clamps_invariants() {
        let t = Tuning::from_json(
            r#"{ "heavy_chance": 3.0, "start_health": 0, "scatter_spread": [],
                 "light": { "radius": 12.0, "speed": 2.0, "hp": 0, "score": 10 } }"#,
        )
        .unwrap();
        assert_eq!(t.heavy_chance, 1.0);
        assert_eq!(t.start_health, 1);
        assert_eq!(t.light.hp, 1);
        assert_eq!(t.scatter_spread, SCATTER_SPREAD.to_vec());
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(Tuning::from_json("{ not json").is_err());
    }
}
