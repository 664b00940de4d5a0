//! Neon Swarm - A neon arena shooter
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (spawning, weapons, collisions, game state)
//! - `game`: Frame driver tying a session to a clock and a presenter
//! - `present`: Presentation adapter interface consumed by the core
//! - `renderer`: Canvas 2D presenter (browser only)
//! - `tuning`: Data-driven game balance

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod game;
pub mod present;
#[cfg(target_arch = "wasm32")]
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::{Clock, Game, LoopControl, ManualClock, SystemClock};
pub use present::{HitCue, Presenter, Shape};
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 14.0;
    pub const PLAYER_SPEED: f32 = 4.0;
    /// Pointer closer than this leaves the player where it is
    pub const PLAYER_DEADZONE: f32 = 1.0;
    /// Starting health: 3 hearts, 2 points per heart
    pub const START_HEALTH: u8 = 6;
    pub const HEART_COUNT: usize = 3;
    pub const HEALTH_PER_HEART: u8 = 2;

    /// Minimum interval between volleys (ms)
    pub const FIRE_RATE_MS: f64 = 200.0;
    pub const BULLET_SPEED: f32 = 10.0;
    pub const BULLET_RADIUS: f32 = 4.0;
    pub const RAILGUN_SPEED: f32 = 20.0;
    pub const RAILGUN_RADIUS: f32 = 6.0;
    /// Angular offsets of a scatter volley (radians)
    pub const SCATTER_SPREAD: [f32; 3] = [-0.2, 0.0, 0.2];

    /// Enemy spawn cadence (ms)
    pub const SPAWN_INTERVAL_MS: f64 = 900.0;
    /// Probability that a spawned enemy is heavy
    pub const HEAVY_CHANCE: f64 = 0.25;

    /// Background stars
    pub const STAR_COUNT: usize = 120;
    pub const STAR_MIN_DEPTH: f32 = 0.5;
    pub const STAR_MAX_DEPTH: f32 = 2.5;

    /// Palette (0xRRGGBB)
    pub const COLOR_PLAYER: u32 = 0x00ffff;
    pub const COLOR_LIGHT_ENEMY: u32 = 0xff0000;
    pub const COLOR_HEAVY_ENEMY: u32 = 0xffea00;
    pub const COLOR_NORMAL_SHOT: u32 = 0xffe600;
    pub const COLOR_SCATTER_SHOT: u32 = 0xff00ff;
    pub const COLOR_RAILGUN_SHOT: u32 = 0x00ffff;
    pub const STAR_COLORS: [u32; 3] = [0x00ffff, 0xff00ff, 0x00ffcc];
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Angle (radians) of the vector pointing from `from` to `to`.
/// Returns 0 when both points coincide.
#[inline]
pub fn aim_angle(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}

/// Unit vector from `from` toward `to`, or zero when the points coincide
#[inline]
pub fn direction(from: Vec2, to: Vec2) -> Vec2 {
    (to - from).normalize_or_zero()
}

/// Unit vector for an angle (radians)
#[inline]
pub fn heading(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Format a packed 0xRRGGBB color as a CSS hex string
pub fn css_color(color: u32) -> String {
    format!("#{:06x}", color & 0xff_ffff)
}

/// Add or remove one token in a space-separated class list, keeping the rest
pub fn with_class(classes: &str, token: &str, present: bool) -> String {
    let mut out: Vec<&str> = classes.split_whitespace().filter(|c| *c != token).collect();
    if present {
        out.push(token);
    }
    out.join(" ")
}
