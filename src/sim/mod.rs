//! Simulation module
//!
//! All gameplay logic lives here. No rendering, audio or platform code:
//! - Movement is stepped once per tick
//! - Spawn and fire gates read the caller's wall-clock timestamp
//! - Randomness comes from the session's seeded RNG
//! - Collision precedence follows collection order

pub mod input;
pub mod spawner;
pub mod starfield;
pub mod state;
pub mod tick;
pub mod weapon;

pub use input::{Control, InputController, TickInput};
pub use spawner::Spawner;
pub use starfield::{Star, Starfield};
pub use state::{
    Bullet, Enemy, EnemyKind, Field, GameEvent, GamePhase, GameState, Heart, Player, WeaponMode,
    hearts,
};
pub use tick::tick;
pub use weapon::Weapon;
