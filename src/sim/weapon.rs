//! Fire-rate gating and per-mode volleys

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Bullet, WeaponMode};
use crate::aim_angle;
use crate::tuning::{ShotStats, Tuning};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Weapon {
    /// Minimum milliseconds between volleys
    pub fire_rate_ms: f64,
    /// Timestamp of the last volley actually fired
    last_fire_ms: Option<f64>,
}

impl Weapon {
    pub fn new(fire_rate_ms: f64) -> Self {
        Self {
            fire_rate_ms,
            last_fire_ms: None,
        }
    }

    pub fn last_fire_ms(&self) -> Option<f64> {
        self.last_fire_ms
    }

    /// Whether a volley fired at `now_ms` would pass the gate
    pub fn is_ready(&self, now_ms: f64) -> bool {
        self.last_fire_ms
            .is_none_or(|last| now_ms - last >= self.fire_rate_ms)
    }

    /// Fire a volley from `origin` toward `target`.
    ///
    /// Returns no bullets (and leaves the gate untouched) while the previous
    /// volley is younger than the fire rate.
    pub fn try_fire(
        &mut self,
        now_ms: f64,
        origin: Vec2,
        target: Vec2,
        mode: WeaponMode,
        tuning: &Tuning,
    ) -> Vec<Bullet> {
        if !self.is_ready(now_ms) {
            return Vec::new();
        }
        self.last_fire_ms = Some(now_ms);

        let aim = aim_angle(origin, target);
        match mode {
            WeaponMode::Normal => vec![shot(origin, aim, &tuning.normal_shot, mode)],
            WeaponMode::Scatter => tuning
                .scatter_spread
                .iter()
                .map(|offset| shot(origin, aim + offset, &tuning.scatter_shot, mode))
                .collect(),
            WeaponMode::Railgun => vec![shot(origin, aim, &tuning.railgun_shot, mode)],
        }
    }
}

fn shot(origin: Vec2, angle: f32, stats: &ShotStats, mode: WeaponMode) -> Bullet {
    Bullet {
        pos: origin,
        angle,
        speed: stats.speed,
        radius: stats.radius,
        color: stats.color,
        mode,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: Vec2 = Vec2::new(100.0, 100.0);
    const TARGET: Vec2 = Vec2::new(200.0, 100.0);

    #[test]
    fn test_normal_shot() {
        let tuning = Tuning::default();
        let mut weapon = Weapon::new(200.0);
        let shots = weapon.try_fire(0.0, ORIGIN, TARGET, WeaponMode::Normal, &tuning);
        assert_eq!(shots.len(), 1);
        let b = &shots[0];
        assert_eq!(b.pos, ORIGIN);
        assert!(b.angle.abs() < 1e-6);
        assert_eq!((b.speed, b.radius, b.color), (10.0, 4.0, 0xffe600));
        assert_eq!(b.mode, WeaponMode::Normal);
    }

    #[test]
    fn test_scatter_volley_offsets() {
        let tuning = Tuning::default();
        let mut weapon = Weapon::new(200.0);
        // Aim straight down (+y) so the base angle is pi/2
        let target = Vec2::new(100.0, 300.0);
        let shots = weapon.try_fire(0.0, ORIGIN, target, WeaponMode::Scatter, &tuning);
        assert_eq!(shots.len(), 3);

        let base = std::f32::consts::FRAC_PI_2;
        for (b, offset) in shots.iter().zip([-0.2f32, 0.0, 0.2]) {
            assert!((b.angle - (base + offset)).abs() < 1e-6);
            assert_eq!((b.speed, b.radius, b.color), (10.0, 4.0, 0xff00ff));
        }
    }

    #[test]
    fn test_railgun_shot() {
        let tuning = Tuning::default();
        let mut weapon = Weapon::new(200.0);
        let shots = weapon.try_fire(0.0, ORIGIN, TARGET, WeaponMode::Railgun, &tuning);
        assert_eq!(shots.len(), 1);
        assert_eq!((shots[0].speed, shots[0].radius, shots[0].color), (20.0, 6.0, 0x00ffff));
    }

    #[test]
    fn test_gate_blocks_within_window() {
        let tuning = Tuning::default();
        let mut weapon = Weapon::new(200.0);
        assert_eq!(weapon.try_fire(1000.0, ORIGIN, TARGET, WeaponMode::Normal, &tuning).len(), 1);
        assert!(weapon.try_fire(1100.0, ORIGIN, TARGET, WeaponMode::Normal, &tuning).is_empty());
        assert!(weapon.try_fire(1199.9, ORIGIN, TARGET, WeaponMode::Scatter, &tuning).is_empty());
        // Gated calls do not push the window forward
        assert_eq!(weapon.last_fire_ms(), Some(1000.0));
        assert_eq!(weapon.try_fire(1200.0, ORIGIN, TARGET, WeaponMode::Normal, &tuning).len(), 1);
        assert_eq!(weapon.last_fire_ms(), Some(1200.0));
    }

    #[test]
    fn test_first_shot_is_never_gated() {
        let tuning = Tuning::default();
        let mut weapon = Weapon::new(200.0);
        assert!(weapon.is_ready(0.0));
        assert_eq!(weapon.try_fire(0.0, ORIGIN, TARGET, WeaponMode::Normal, &tuning).len(), 1);
    }

    #[test]
    fn test_aim_at_self_does_not_produce_nan() {
        let tuning = Tuning::default();
        let mut weapon = Weapon::new(200.0);
        let shots = weapon.try_fire(0.0, ORIGIN, ORIGIN, WeaponMode::Normal, &tuning);
        assert!(shots[0].angle.is_finite());
    }
}
