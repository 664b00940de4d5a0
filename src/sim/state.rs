//! Game state and core simulation types
//!
//! Everything a session owns lives in [`GameState`]; resetting a session
//! replaces the whole value.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::spawner::Spawner;
use super::starfield::Starfield;
use super::weapon::Weapon;
use crate::consts::{HEALTH_PER_HEART, HEART_COUNT};
use crate::tuning::Tuning;
use crate::{direction, heading};

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Intro screen, waiting for the start signal
    Idle,
    /// Active gameplay
    Running,
    /// Health depleted, simulation frozen until reset
    GameOver,
}

/// Weapon mode selected by the held modifier keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WeaponMode {
    #[default]
    Normal,
    Scatter,
    Railgun,
}

/// Enemy variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Big, slow, two hits
    Heavy,
    /// Small, fast, one hit
    Light,
}

/// Visible playfield dimensions, read from the host every frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub width: f32,
    pub height: f32,
}

impl Field {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Inclusive bounds check against [0, width] x [0, height]
    pub fn contains(&self, pos: Vec2) -> bool {
        pos.x >= 0.0 && pos.x <= self.width && pos.y >= 0.0 && pos.y <= self.height
    }
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    /// Units moved per tick
    pub speed: f32,
}

impl Player {
    pub fn new(pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            pos,
            radius: tuning.player_radius,
            speed: tuning.player_speed,
        }
    }

    /// Step toward the pointer; stays put inside the dead zone
    pub fn move_toward(&mut self, target: Vec2, deadzone: f32) {
        if self.pos.distance(target) > deadzone {
            self.pos += direction(self.pos, target) * self.speed;
        }
    }
}

/// A projectile fired by the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    /// Travel direction (radians)
    pub angle: f32,
    pub speed: f32,
    pub radius: f32,
    /// 0xRRGGBB
    pub color: u32,
    pub mode: WeaponMode,
}

impl Bullet {
    /// Move one tick along the travel angle
    pub fn advance(&mut self) {
        self.pos += heading(self.angle) * self.speed;
    }
}

/// A hostile drone chasing the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub hp: u32,
    /// Points awarded when destroyed by bullets
    pub score: u32,
}

impl Enemy {
    /// Build an enemy with the variant's stats; `id` is assigned on insertion
    pub fn new(kind: EnemyKind, pos: Vec2, tuning: &Tuning) -> Self {
        let stats = tuning.enemy(kind);
        Self {
            id: 0,
            kind,
            pos,
            radius: stats.radius,
            speed: stats.speed,
            hp: stats.hp.max(1),
            score: stats.score,
        }
    }

    pub fn is_heavy(&self) -> bool {
        self.kind == EnemyKind::Heavy
    }

    /// Whether a bullet centered at `point` lands inside this enemy
    pub fn is_hit_by(&self, point: Vec2) -> bool {
        self.pos.distance(point) < self.radius
    }
}

/// Fill level of one HUD heart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Heart {
    Full,
    Half,
    Empty,
}

/// Map health points to hearts (index 0 is the first heart to fill)
pub fn hearts(health: u8) -> [Heart; HEART_COUNT] {
    let health = u16::from(health);
    let per_heart = u16::from(HEALTH_PER_HEART);
    let mut out = [Heart::Empty; HEART_COUNT];
    for (i, heart) in out.iter_mut().enumerate() {
        let full_at = (i as u16 + 1) * per_heart;
        *heart = if health >= full_at {
            Heart::Full
        } else if health + per_heart > full_at {
            Heart::Half
        } else {
            Heart::Empty
        };
    }
    out
}

/// Something noteworthy that happened during a tick.
/// The frame driver turns these into audio cues and screen changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    EnemySpawned { id: u32, kind: EnemyKind },
    /// A bullet struck an enemy that may still be alive
    EnemyHit { id: u32, hp_left: u32 },
    EnemyDestroyed { id: u32, kind: EnemyKind, score: u32 },
    /// An enemy rammed the player
    PlayerHit { health: u8 },
    GameOver { final_score: u64 },
}

/// Complete session state
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Session seed
    pub seed: u64,
    /// Balance knobs this session was built with
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub score: u64,
    pub kills: u32,
    pub health: u8,
    /// Weapon mode seen on the last tick
    pub mode: WeaponMode,
    /// Ticks simulated while running
    pub time_ticks: u64,
    pub player: Player,
    /// Live bullets (fire order)
    pub bullets: Vec<Bullet>,
    /// Live enemies (spawn order, which is also collision precedence)
    pub enemies: Vec<Enemy>,
    /// Decorative background
    #[serde(skip)]
    pub stars: Starfield,
    pub spawner: Spawner,
    pub weapon: Weapon,
    #[serde(skip)]
    pub(crate) rng: Pcg32,
    /// Events produced since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create an idle session with default tuning
    pub fn new(seed: u64, field: Field) -> Self {
        Self::with_tuning(seed, field, Tuning::default())
    }

    /// Create an idle session
    pub fn with_tuning(seed: u64, field: Field, mut tuning: Tuning) -> Self {
        tuning.sanitize();
        let mut rng = Pcg32::seed_from_u64(seed);
        let stars = Starfield::new(tuning.star_count, field, &mut rng);
        Self {
            seed,
            phase: GamePhase::Idle,
            score: 0,
            kills: 0,
            health: tuning.start_health,
            mode: WeaponMode::Normal,
            time_ticks: 0,
            player: Player::new(field.center(), &tuning),
            bullets: Vec::new(),
            enemies: Vec::new(),
            stars,
            spawner: Spawner::new(tuning.spawn_interval_ms),
            weapon: Weapon::new(tuning.fire_rate_ms),
            rng,
            events: Vec::new(),
            next_id: 1,
            tuning,
        }
    }

    /// Whether the simulation is ticking
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Idle -> Running. Returns false if the session was not idle.
    pub fn start(&mut self, now_ms: f64) -> bool {
        if self.phase != GamePhase::Idle {
            log::warn!("Ignoring start signal in phase {:?}", self.phase);
            return false;
        }
        self.phase = GamePhase::Running;
        self.spawner.arm(now_ms);
        log::info!("Session started (seed {})", self.seed);
        true
    }

    /// Discard the session and build a fresh idle one with the same tuning
    pub fn reset(&mut self, seed: u64, field: Field) {
        let tuning = self.tuning.clone();
        *self = Self::with_tuning(seed, field, tuning);
        log::info!("Session reset (seed {})", seed);
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Append an enemy, assigning it a fresh id
    pub fn push_enemy(&mut self, mut enemy: Enemy) -> u32 {
        enemy.id = self.next_entity_id();
        let id = enemy.id;
        self.enemies.push(enemy);
        id
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Current heart display
    pub fn hearts(&self) -> [Heart; HEART_COUNT] {
        hearts(self.health)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> Field {
        Field::new(800.0, 600.0)
    }

    #[test]
    fn test_new_session_defaults() {
        let state = GameState::new(7, field());
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.health, 6);
        assert_eq!(state.score, 0);
        assert_eq!(state.kills, 0);
        assert_eq!(state.mode, WeaponMode::Normal);
        assert_eq!(state.player.pos, Vec2::new(400.0, 300.0));
        assert_eq!(state.player.radius, 14.0);
        assert_eq!(state.player.speed, 4.0);
        assert!(state.bullets.is_empty());
        assert!(state.enemies.is_empty());
        assert_eq!(state.stars.stars.len(), 120);
    }

    #[test]
    fn test_code_built_tuning_is_sanitized() {
        let tuning = Tuning {
            heavy_chance: 7.5,
            start_health: 0,
            ..Tuning::default()
        };
        let mut state = GameState::with_tuning(7, field(), tuning);
        assert_eq!(state.tuning.heavy_chance, 1.0);
        assert_eq!(state.health, 1);

        // Out-of-range odds would make the spawn roll panic
        state.start(0.0);
        let enemy = state.spawner.tick(900.0, field(), &state.tuning, &mut state.rng);
        assert_eq!(enemy.map(|e| e.kind), Some(EnemyKind::Heavy));
    }

    #[test]
    fn test_start_only_from_idle() {
        let mut state = GameState::new(7, field());
        assert!(state.start(0.0));
        assert!(state.is_running());
        assert!(!state.start(10.0));

        state.phase = GamePhase::GameOver;
        assert!(!state.start(20.0));
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_reset_discards_everything() {
        let mut state = GameState::new(7, field());
        state.start(0.0);
        state.score = 120;
        state.kills = 5;
        state.health = 1;
        state.push_enemy(Enemy::new(EnemyKind::Light, Vec2::ZERO, &state.tuning.clone()));
        state.phase = GamePhase::GameOver;

        state.reset(8, Field::new(1024.0, 768.0));
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.seed, 8);
        assert_eq!(state.score, 0);
        assert_eq!(state.kills, 0);
        assert_eq!(state.health, 6);
        assert!(state.enemies.is_empty());
        assert_eq!(state.player.pos, Vec2::new(512.0, 384.0));
        assert_eq!(state.next_entity_id(), 1);
    }

    #[test]
    fn test_enemy_variants() {
        let tuning = Tuning::default();
        let heavy = Enemy::new(EnemyKind::Heavy, Vec2::ZERO, &tuning);
        assert_eq!((heavy.radius, heavy.speed, heavy.hp, heavy.score), (24.0, 1.0, 2, 30));
        assert!(heavy.is_heavy());

        let light = Enemy::new(EnemyKind::Light, Vec2::ZERO, &tuning);
        assert_eq!((light.radius, light.speed, light.hp, light.score), (12.0, 2.0, 1, 10));
        assert!(light.is_hit_by(Vec2::new(11.9, 0.0)));
        assert!(!light.is_hit_by(Vec2::new(12.0, 0.0)));
    }

    #[test]
    fn test_player_deadzone() {
        let tuning = Tuning::default();
        let mut player = Player::new(Vec2::new(100.0, 100.0), &tuning);
        player.move_toward(Vec2::new(100.5, 100.5), 1.0);
        assert_eq!(player.pos, Vec2::new(100.0, 100.0));

        player.move_toward(Vec2::new(200.0, 100.0), 1.0);
        assert!((player.pos.x - 104.0).abs() < 1e-5);
        assert_eq!(player.pos.y, 100.0);
    }

    #[test]
    fn test_field_bounds_inclusive() {
        let f = field();
        assert!(f.contains(Vec2::new(0.0, 0.0)));
        assert!(f.contains(Vec2::new(800.0, 600.0)));
        assert!(!f.contains(Vec2::new(-0.1, 10.0)));
        assert!(!f.contains(Vec2::new(10.0, 600.1)));
    }

    #[test]
    fn test_hearts_mapping() {
        use Heart::*;
        assert_eq!(hearts(6), [Full, Full, Full]);
        assert_eq!(hearts(5), [Full, Full, Half]);
        assert_eq!(hearts(4), [Full, Full, Empty]);
        assert_eq!(hearts(3), [Full, Half, Empty]);
        assert_eq!(hearts(2), [Full, Empty, Empty]);
        assert_eq!(hearts(1), [Half, Empty, Empty]);
        assert_eq!(hearts(0), [Empty, Empty, Empty]);
    }

    #[test]
    fn test_entity_ids_are_sequential() {
        let mut state = GameState::new(1, field());
        let tuning = state.tuning.clone();
        let a = state.push_enemy(Enemy::new(EnemyKind::Light, Vec2::ZERO, &tuning));
        let b = state.push_enemy(Enemy::new(EnemyKind::Heavy, Vec2::ZERO, &tuning));
        assert_eq!((a, b), (1, 2));
        assert_eq!(state.enemies[1].id, 2);
    }
}
