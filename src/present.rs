//! Presentation adapter interface
//!
//! The core never draws, plays sound or touches the DOM itself. The frame
//! driver calls into a [`Presenter`] once per frame with the current state.

use glam::Vec2;

use crate::consts::HEART_COUNT;
use crate::sim::{Field, Heart};

/// Outline used to draw an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Player and light enemies (points along the heading)
    Triangle,
    /// Heavy enemies
    Hexagon,
    /// Bullets
    Circle,
    /// Background stars
    Square,
}

/// Audio cue kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitCue {
    /// An enemy rammed the player
    Player,
    /// A bullet struck an enemy
    Enemy,
}

/// Host-side rendering, audio and screen management
pub trait Presenter {
    /// Current playfield size; may change between frames
    fn field(&self) -> Field;

    /// Clear and paint the background for a new frame
    fn begin_frame(&mut self, field: Field);

    /// Draw one entity. `color` is 0xRRGGBB; `None` lets the host choose.
    fn render_entity(&mut self, shape: Shape, pos: Vec2, size: f32, angle: f32, color: Option<u32>);

    fn render_hearts(&mut self, hearts: [Heart; HEART_COUNT]);

    fn update_score_display(&mut self, score: u64, kills: u32);

    /// Hide the intro, show the arena and HUD
    fn show_playfield(&mut self);

    fn show_game_over(&mut self, final_score: u64);

    /// Back to the intro screen after a reset
    fn reset_to_intro(&mut self);

    /// Fire-and-forget sound; must not block
    fn play_hit_cue(&mut self, cue: HitCue);
}
