//! Neon Swarm entry point
//!
//! Browser build: wires DOM events to the game and runs the
//! requestAnimationFrame loop. Native build: headless autopilot run.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{KeyboardEvent, MouseEvent};

    use neon_swarm::renderer::CanvasPresenter;
    use neon_swarm::sim::Control;
    use neon_swarm::{Game, LoopControl, Settings, SystemClock, Tuning};

    /// Game plus loop bookkeeping
    struct App {
        game: Game<CanvasPresenter, SystemClock>,
        /// A requestAnimationFrame callback is pending
        looping: bool,
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Neon Swarm starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let settings = Settings::default();
        let Some(presenter) = CanvasPresenter::new(document, &settings) else {
            log::error!("No #gameCanvas with a 2D context - cannot start");
            return;
        };

        let seed = js_sys::Date::now() as u64;
        let game = Game::with_tuning(seed, Tuning::default(), settings, presenter, SystemClock::new());
        let app = Rc::new(RefCell::new(App {
            game,
            looping: false,
        }));

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(app.clone());
        setup_buttons(app.clone());
        setup_resize(app);
    }

    fn setup_input_handlers(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else { return };

        // Pointer position steers and aims
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                app.borrow_mut()
                    .game
                    .input
                    .pointer_moved(event.client_x() as f32, event.client_y() as f32);
            });
            let _ = window
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Held keys: fire and weapon modifiers
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(control) = Control::from_key(&event.key()) {
                    app.borrow_mut().game.input.key_down(control);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(control) = Control::from_key(&event.key()) {
                    app.borrow_mut().game.input.key_up(control);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key-ups are lost while unfocused
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                app.borrow_mut().game.input.release_all();
                log::info!("Window blurred - released held keys");
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(app: Rc<RefCell<App>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("start-btn") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let control = app.borrow_mut().game.start();
                if control == LoopControl::Continue {
                    request_animation_frame(app.clone());
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("reboot-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let seed = js_sys::Date::now() as u64;
                app.borrow_mut().game.reset(seed);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::UiEvent| {
            app.borrow().game.presenter().resize();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        {
            let mut a = app.borrow_mut();
            if a.looping {
                return;
            }
            a.looping = true;
        }
        schedule(app);
    }

    fn schedule(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |_time: f64| {
            game_loop(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>) {
        let control = app.borrow_mut().game.frame();
        match control {
            LoopControl::Continue => schedule(app),
            LoopControl::Stop => app.borrow_mut().looping = false,
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use glam::Vec2;
    use serde::Serialize;

    use neon_swarm::consts::HEART_COUNT;
    use neon_swarm::sim::{Control, Field, GamePhase, Heart};
    use neon_swarm::{Clock, Game, HitCue, LoopControl, ManualClock, Presenter, Settings, Shape, Tuning};

    /// 60 Hz display refresh
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Give up after this much simulated time
    const MAX_FRAMES: u64 = 60 * 120;

    /// Presenter that only logs
    struct LogPresenter {
        field: Field,
        enemy_cues: u32,
        player_cues: u32,
        final_score: Option<u64>,
    }

    impl Presenter for LogPresenter {
        fn field(&self) -> Field {
            self.field
        }

        fn begin_frame(&mut self, _field: Field) {}

        fn render_entity(&mut self, _shape: Shape, _pos: Vec2, _size: f32, _angle: f32, _color: Option<u32>) {}

        fn render_hearts(&mut self, _hearts: [Heart; HEART_COUNT]) {}

        fn update_score_display(&mut self, _score: u64, _kills: u32) {}

        fn show_playfield(&mut self) {
            log::info!("Arena {}x{} live", self.field.width, self.field.height);
        }

        fn show_game_over(&mut self, final_score: u64) {
            self.final_score = Some(final_score);
        }

        fn reset_to_intro(&mut self) {}

        fn play_hit_cue(&mut self, cue: HitCue) {
            match cue {
                HitCue::Enemy => self.enemy_cues += 1,
                HitCue::Player => self.player_cues += 1,
            }
            log::debug!("cue {:?}", cue);
        }
    }

    #[derive(Serialize)]
    pub struct Summary {
        pub seed: u64,
        pub settings: Settings,
        pub frames: u64,
        pub sim_seconds: f64,
        pub phase: GamePhase,
        pub score: u64,
        pub kills: u32,
        pub health: u8,
        pub enemies_alive: usize,
        pub enemy_hits: u32,
        pub player_hits: u32,
    }

    /// Run the autopilot and print its summary as JSON
    pub fn run(seed: u64, tuning: Tuning, settings: Settings) {
        let summary = play(seed, tuning, settings, MAX_FRAMES);
        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{json}"),
            Err(e) => log::error!("Failed to encode summary: {}", e),
        }
    }

    /// Orbiting, always-firing autopilot until game over or `max_frames`
    pub fn play(seed: u64, tuning: Tuning, settings: Settings, max_frames: u64) -> Summary {
        let presenter = LogPresenter {
            field: Field::new(1280.0, 720.0),
            enemy_cues: 0,
            player_cues: 0,
            final_score: None,
        };
        let mut game = Game::with_tuning(seed, tuning, settings, presenter, ManualClock::new(0.0));
        game.start();
        game.input.key_down(Control::Fire);

        let center = game.presenter().field().center();
        let mut frames = 0;
        let mut mode_key: Option<Control> = None;

        while frames < max_frames {
            let t = frames as f32 * 0.01;
            let target = center + Vec2::new(t.cos(), t.sin()) * 250.0;
            game.input.pointer_moved(target.x, target.y);

            // Cycle weapons every two seconds
            let wanted = match (frames / 120) % 3 {
                0 => None,
                1 => Some(Control::Scatter),
                _ => Some(Control::Railgun),
            };
            if wanted != mode_key {
                if let Some(key) = mode_key {
                    game.input.key_up(key);
                }
                if let Some(key) = wanted {
                    game.input.key_down(key);
                }
                mode_key = wanted;
            }

            game.clock().advance(FRAME_MS);
            frames += 1;
            if game.frame() == LoopControl::Stop {
                break;
            }
        }

        Summary {
            seed,
            settings: game.settings.clone(),
            frames,
            sim_seconds: game.clock().now_ms() / 1000.0,
            phase: game.state.phase,
            score: game.presenter().final_score.unwrap_or(game.state.score),
            kills: game.state.kills,
            health: game.state.health,
            enemies_alive: game.state.enemies.len(),
            enemy_hits: game.presenter().enemy_cues,
            player_hits: game.presenter().player_cues,
        }
    }
}

/// Read and parse an optional JSON config file, falling back to defaults
#[cfg(not(target_arch = "wasm32"))]
fn load_config<T: Default>(
    path: Option<&str>,
    what: &str,
    parse: fn(&str) -> Result<T, serde_json::Error>,
) -> T {
    let Some(path) = path else {
        return T::default();
    };
    match std::fs::read_to_string(path) {
        Ok(json) => parse(&json).unwrap_or_else(|e| {
            log::warn!("Invalid {} file {}: {} - using defaults", what, path, e);
            T::default()
        }),
        Err(e) => {
            log::warn!("Cannot read {} file {}: {} - using defaults", what, path, e);
            T::default()
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Neon Swarm (native) starting...");
    log::info!("Native mode runs a headless autopilot - run with `trunk serve` for the web version");

    // Optional tuning and settings JSON files
    let args: Vec<String> = std::env::args().collect();
    let tuning = load_config(args.get(1).map(String::as_str), "tuning", neon_swarm::Tuning::from_json);
    let settings = load_config(args.get(2).map(String::as_str), "settings", neon_swarm::Settings::from_json);
    log::info!("Settings: {}", settings.to_json());

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    headless::run(seed, tuning, settings);
}
