//! Frame driver
//!
//! [`Game`] owns one session, the input controller and the presenter. The
//! host calls [`Game::frame`] from its display-refresh callback and keeps
//! re-requesting frames while it returns [`LoopControl::Continue`].

use std::cell::Cell;

use glam::Vec2;

use crate::aim_angle;
use crate::consts::{COLOR_HEAVY_ENEMY, COLOR_LIGHT_ENEMY, COLOR_PLAYER};
use crate::present::{HitCue, Presenter, Shape};
use crate::settings::Settings;
use crate::sim::{EnemyKind, Field, GameEvent, GameState, InputController, tick};
use crate::tuning::Tuning;

/// Wall-clock source in milliseconds
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Real time: `Date.now()` in the browser, a monotonic origin natively
#[derive(Debug, Clone)]
pub struct SystemClock {
    #[cfg(not(target_arch = "wasm32"))]
    origin: std::time::Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_arch = "wasm32"))]
            origin: std::time::Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    #[cfg(target_arch = "wasm32")]
    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Hand-driven clock for tests and the headless autopilot
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    pub fn advance(&self, ms: f64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

/// Whether the host should schedule another frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Stop,
}

/// Game instance holding all state
pub struct Game<P: Presenter, C: Clock> {
    pub state: GameState,
    pub input: InputController,
    pub settings: Settings,
    presenter: P,
    clock: C,
}

impl<P: Presenter, C: Clock> Game<P, C> {
    pub fn new(seed: u64, presenter: P, clock: C) -> Self {
        Self::with_tuning(seed, Tuning::default(), Settings::default(), presenter, clock)
    }

    pub fn with_tuning(seed: u64, tuning: Tuning, settings: Settings, presenter: P, clock: C) -> Self {
        let field = presenter.field();
        Self {
            state: GameState::with_tuning(seed, field, tuning),
            input: InputController::new(field.center()),
            settings,
            presenter,
            clock,
        }
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Start signal from the intro screen
    pub fn start(&mut self) -> LoopControl {
        let now = self.clock.now_ms();
        if !self.state.start(now) {
            return LoopControl::Stop;
        }
        self.presenter.show_playfield();
        LoopControl::Continue
    }

    /// Throw the session away and return to the intro screen
    pub fn reset(&mut self, seed: u64) {
        let field = self.presenter.field();
        self.state.reset(seed, field);
        self.input = InputController::new(field.center());
        self.presenter.reset_to_intro();
    }

    /// Run one frame: tick, dispatch events, draw
    pub fn frame(&mut self) -> LoopControl {
        if !self.state.is_running() {
            return LoopControl::Stop;
        }

        let field = self.presenter.field();
        let input = self.input.snapshot(field);
        tick(&mut self.state, &input, self.clock.now_ms());

        for event in self.state.drain_events() {
            match event {
                GameEvent::EnemyHit { .. } => self.presenter.play_hit_cue(HitCue::Enemy),
                GameEvent::PlayerHit { .. } => self.presenter.play_hit_cue(HitCue::Player),
                GameEvent::GameOver { final_score } => self.presenter.show_game_over(final_score),
                GameEvent::EnemySpawned { .. } | GameEvent::EnemyDestroyed { .. } => {}
            }
        }

        if !self.state.is_running() {
            return LoopControl::Stop;
        }

        self.render(field, input.pointer);
        LoopControl::Continue
    }

    fn render(&mut self, field: Field, pointer: Vec2) {
        let state = &self.state;
        let presenter = &mut self.presenter;

        presenter.begin_frame(field);

        if self.settings.starfield {
            for star in &state.stars.stars {
                presenter.render_entity(Shape::Square, star.pos, star.depth, 0.0, None);
            }
        }

        for bullet in &state.bullets {
            presenter.render_entity(
                Shape::Circle,
                bullet.pos,
                bullet.radius,
                bullet.angle,
                Some(bullet.color),
            );
        }

        let player = state.player.pos;
        for enemy in &state.enemies {
            let (shape, color) = match enemy.kind {
                EnemyKind::Heavy => (Shape::Hexagon, COLOR_HEAVY_ENEMY),
                EnemyKind::Light => (Shape::Triangle, COLOR_LIGHT_ENEMY),
            };
            let angle = aim_angle(enemy.pos, player);
            presenter.render_entity(shape, enemy.pos, enemy.radius, angle, Some(color));
        }

        presenter.render_entity(
            Shape::Triangle,
            player,
            state.player.radius,
            aim_angle(player, pointer),
            Some(COLOR_PLAYER),
        );

        presenter.render_hearts(state.hearts());
        presenter.update_score_display(state.score, state.kills);
    }
}
