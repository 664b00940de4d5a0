//! Canvas 2D presenter
//!
//! Neon outlines with shadow-blur glow, a radial background gradient and
//! DOM elements for the intro, HUD and game-over screens.

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

use crate::audio::AudioManager;
use crate::consts::{HEART_COUNT, STAR_COLORS};
use crate::{css_color, with_class};
use crate::present::{HitCue, Presenter, Shape};
use crate::settings::Settings;
use crate::sim::{Field, Heart};

const HEART_WIDTH: f64 = 20.0;
const HEART_HEIGHT: f64 = 20.0;
const HEART_SPACING: f64 = 10.0;

pub struct CanvasPresenter {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    document: Document,
    audio: AudioManager,
    glow: bool,
}

impl CanvasPresenter {
    /// Bind to the `#gameCanvas` element; `None` if the page lacks it
    pub fn new(document: Document, settings: &Settings) -> Option<Self> {
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")?
            .dyn_into()
            .ok()?;
        let ctx: CanvasRenderingContext2d = canvas.get_context("2d").ok()??.dyn_into().ok()?;

        let presenter = Self {
            canvas,
            ctx,
            document,
            audio: AudioManager::new(settings),
            glow: settings.glow,
        };
        presenter.resize();
        Some(presenter)
    }

    /// Match the canvas to the window's inner size
    pub fn resize(&self) {
        let Some(window) = web_sys::window() else { return };
        let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(800.0);
        let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(600.0);
        self.canvas.set_width(width as u32);
        self.canvas.set_height(height as u32);
    }

    fn set_visible(&self, id: &str, visible: bool) {
        if let Some(el) = self.document.get_element_by_id(id) {
            el.set_class_name(&with_class(&el.class_name(), "hidden", !visible));
        }
    }

    fn set_text(&self, id: &str, text: &str) {
        if let Some(el) = self.document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_glow(&self, color: &str, blur: f64) {
        if self.glow {
            self.ctx.set_shadow_color(color);
            self.ctx.set_shadow_blur(blur);
        } else {
            self.ctx.set_shadow_blur(0.0);
        }
    }

    fn triangle(&self, pos: Vec2, size: f64, angle: f64, color: &str) {
        let ctx = &self.ctx;
        ctx.save();
        let _ = ctx.translate(pos.x as f64, pos.y as f64);
        let _ = ctx.rotate(angle);
        ctx.set_line_width(2.0);
        ctx.set_stroke_style_str(color);
        self.set_glow(color, 10.0);
        ctx.begin_path();
        ctx.move_to(size, 0.0);
        ctx.line_to(-size, -size / 1.5);
        ctx.line_to(-size, size / 1.5);
        ctx.close_path();
        ctx.stroke();
        ctx.restore();
    }

    fn hexagon(&self, pos: Vec2, size: f64, angle: f64, color: &str) {
        use std::f64::consts::PI;

        let ctx = &self.ctx;
        ctx.save();
        let _ = ctx.translate(pos.x as f64, pos.y as f64);
        let _ = ctx.rotate(angle);
        ctx.set_line_width(3.0);
        ctx.set_stroke_style_str(color);
        self.set_glow(color, 12.0);
        ctx.begin_path();
        for i in 0..6 {
            let a = i as f64 * PI / 3.0;
            ctx.line_to(size * a.cos(), size * a.sin());
        }
        ctx.close_path();
        ctx.stroke();
        ctx.restore();
    }

    fn circle(&self, pos: Vec2, radius: f64, color: &str) {
        let ctx = &self.ctx;
        ctx.begin_path();
        let _ = ctx.arc(pos.x as f64, pos.y as f64, radius, 0.0, std::f64::consts::TAU);
        ctx.set_fill_style_str(color);
        self.set_glow(color, 12.0);
        ctx.fill();
    }

    fn square(&self, pos: Vec2, size: f64, color: &str) {
        self.ctx.set_shadow_blur(0.0);
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(pos.x as f64, pos.y as f64, size, size);
    }

    fn heart(&self, x: f64, y: f64, color: &str) {
        let (w, h) = (HEART_WIDTH, HEART_HEIGHT);
        let ctx = &self.ctx;
        ctx.set_shadow_blur(0.0);
        ctx.set_fill_style_str(color);
        ctx.begin_path();
        ctx.move_to(x + w / 2.0, y + h / 5.0);
        ctx.bezier_curve_to(x + w / 2.0, y, x, y, x, y + h / 4.0);
        ctx.bezier_curve_to(x, y + h / 2.0, x + w / 2.0, y + 3.0 * h / 4.0, x + w / 2.0, y + h);
        ctx.bezier_curve_to(x + w / 2.0, y + 3.0 * h / 4.0, x + w, y + h / 2.0, x + w, y + h / 4.0);
        ctx.bezier_curve_to(x + w, y, x + w / 2.0, y, x + w / 2.0, y + h / 5.0);
        ctx.fill();
    }
}

impl Presenter for CanvasPresenter {
    fn field(&self) -> Field {
        Field::new(self.canvas.width() as f32, self.canvas.height() as f32)
    }

    fn begin_frame(&mut self, field: Field) {
        let (w, h) = (field.width as f64, field.height as f64);
        self.ctx.clear_rect(0.0, 0.0, w, h);

        match self.ctx.create_radial_gradient(w / 2.0, h / 2.0, 0.0, w / 2.0, h / 2.0, h) {
            Ok(gradient) => {
                let _ = gradient.add_color_stop(0.0, "#020b10");
                let _ = gradient.add_color_stop(1.0, "#000");
                self.ctx.set_fill_style_canvas_gradient(&gradient);
            }
            Err(_) => self.ctx.set_fill_style_str("#000"),
        }
        self.ctx.fill_rect(0.0, 0.0, w, h);
    }

    fn render_entity(&mut self, shape: Shape, pos: Vec2, size: f32, angle: f32, color: Option<u32>) {
        let color = match color {
            Some(c) => css_color(c),
            // Twinkle: pick a palette color every frame
            None => {
                let i = (js_sys::Math::random() * STAR_COLORS.len() as f64) as usize;
                css_color(STAR_COLORS[i.min(STAR_COLORS.len() - 1)])
            }
        };
        let (size, angle) = (size as f64, angle as f64);
        match shape {
            Shape::Triangle => self.triangle(pos, size, angle, &color),
            Shape::Hexagon => self.hexagon(pos, size, angle, &color),
            Shape::Circle => self.circle(pos, size, &color),
            Shape::Square => self.square(pos, size, &color),
        }
    }

    fn render_hearts(&mut self, hearts: [Heart; HEART_COUNT]) {
        let width = self.canvas.width() as f64;
        for (i, heart) in hearts.iter().enumerate() {
            let x = width - (i as f64 + 1.0) * (HEART_WIDTH + HEART_SPACING);
            let color = match heart {
                Heart::Full => "red",
                Heart::Half => "pink",
                Heart::Empty => "#555",
            };
            self.heart(x, 20.0, color);
        }
    }

    fn update_score_display(&mut self, score: u64, kills: u32) {
        self.set_text("score", &score.to_string());
        self.set_text("kills", &kills.to_string());
    }

    fn show_playfield(&mut self) {
        self.audio.resume();
        self.set_visible("intro-screen", false);
        self.set_visible("gameCanvas", true);
        self.set_visible("hud", true);
    }

    fn show_game_over(&mut self, final_score: u64) {
        self.set_visible("gameCanvas", false);
        self.set_visible("hud", false);
        self.set_text("finalScore", &final_score.to_string());
        self.set_visible("game-over", true);
    }

    fn reset_to_intro(&mut self) {
        self.set_visible("game-over", false);
        self.set_visible("gameCanvas", false);
        self.set_visible("hud", false);
        self.set_text("score", "0");
        self.set_text("kills", "0");
        self.set_visible("intro-screen", true);
    }

    fn play_hit_cue(&mut self, cue: HitCue) {
        self.audio.play(cue);
    }
}
