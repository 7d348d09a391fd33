//! Grid Snake entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlSelectElement, KeyboardEvent};

    use grid_snake::hud::HudSnapshot;
    use grid_snake::persistence::{KeyValueStore, LocalStorage, MemoryStore};
    use grid_snake::platform::signal_for_key;
    use grid_snake::renderer::CanvasPainter;
    use grid_snake::sim::{GameEvent, GamePhase};
    use grid_snake::{BoardSize, DifficultyCurve, Session, Settings, WallMode};

    /// Game instance holding all state
    struct Game {
        session: Session<Box<dyn KeyValueStore>>,
        painter: CanvasPainter,
        last_phase: GamePhase,
    }

    impl Game {
        /// Run simulation ticks, then draw once
        fn update(&mut self, time: f64) {
            self.session.frame(time);

            for event in self.session.drain_events() {
                match event {
                    GameEvent::LevelUp { level } => log::info!("Level {}", level),
                    GameEvent::ItemCollected { kind } => log::info!("Picked up {}", kind.as_str()),
                    other => log::debug!("{:?}", other),
                }
            }

            let scene = self.session.scene(time);
            self.painter.paint(&scene);
            self.update_hud(time);
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self, time: f64) {
            let window = web_sys::window().unwrap();
            let document = window.document().unwrap();
            let hud = self.session.hud(time);

            set_text(&document, "hud-score", &hud.score.to_string());
            set_text(&document, "hud-best", &hud.best.to_string());
            set_text(&document, "hud-level", &hud.level.to_string());
            set_text(&document, "hud-speed", &hud.speed_label());
            set_text(&document, "hud-combo", &combo_label(&hud));

            if let Some(bar) = document.get_element_by_id("hud-combo-bar") {
                let width = (hud.combo_fraction * 100.0).round();
                let _ = bar.set_attribute("style", &format!("width: {}%", width));
            }

            let badges: Vec<String> = hud
                .badges
                .iter()
                .map(|b| format!("{} {}s", b.kind.as_str(), b.seconds))
                .collect();
            set_text(&document, "hud-effects", &badges.join(" · "));

            // Overlays only change on phase transitions
            if hud.phase != self.last_phase {
                set_hidden(&document, "paused", hud.phase != GamePhase::Paused);
                set_hidden(&document, "game-over", hud.phase != GamePhase::GameOver);
                if let Some(summary) = self.session.game_over() {
                    set_text(&document, "final-score", &summary.score.to_string());
                    set_hidden(&document, "new-best", !summary.new_best);
                }
                self.last_phase = hud.phase;
            }
        }
    }

    fn combo_label(hud: &HudSnapshot) -> String {
        if hud.combo > 1 {
            format!("x{}", hud.combo)
        } else {
            String::new()
        }
    }

    fn set_text(document: &web_sys::Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_hidden(document: &web_sys::Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.class_list().toggle_with_force("hidden", hidden);
        }
    }

    fn open_store() -> Box<dyn KeyValueStore> {
        match LocalStorage::open() {
            Ok(storage) => Box::new(storage),
            Err(e) => {
                log::warn!("{}; progress will not be saved", e);
                Box::new(MemoryStore::new())
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Grid Snake starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let seed = js_sys::Date::now() as u64;
        let session = Session::new(open_store(), seed);
        sync_settings_controls(&document, session.settings());

        let game = Rc::new(RefCell::new(Game {
            session,
            painter: CanvasPainter::new(canvas, ctx),
            last_phase: GamePhase::Playing,
        }));

        setup_keyboard(game.clone());
        setup_settings_controls(game.clone());
        setup_auto_pause(game.clone());

        request_animation_frame(game);

        log::info!("Grid Snake running!");
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if let Some(signal) = signal_for_key(&event.key()) {
                event.prevent_default();
                game.borrow_mut()
                    .session
                    .handle_input(signal, event.time_stamp());
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    const SETTINGS_SELECTS: [&str; 3] = ["board-size", "wall-mode", "difficulty"];

    fn select_value(document: &web_sys::Document, id: &str) -> Option<String> {
        document
            .get_element_by_id(id)?
            .dyn_into::<HtmlSelectElement>()
            .ok()
            .map(|select| select.value())
    }

    fn sync_settings_controls(document: &web_sys::Document, settings: Settings) {
        let values = [
            settings.board_size.as_str(),
            settings.wall_mode.as_str(),
            settings.difficulty_curve.as_str(),
        ];
        for (id, value) in SETTINGS_SELECTS.iter().zip(values) {
            if let Some(select) = document
                .get_element_by_id(id)
                .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
            {
                select.set_value(value);
            }
        }
    }

    /// Changing any setting starts a new game with the new settings
    fn setup_settings_controls(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        for id in SETTINGS_SELECTS {
            let Some(select) = document.get_element_by_id(id) else {
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let document = web_sys::window().unwrap().document().unwrap();
                let mut g = game.borrow_mut();
                let current = g.session.settings();
                let settings = Settings {
                    board_size: select_value(&document, "board-size")
                        .and_then(|v| BoardSize::from_str(&v))
                        .unwrap_or(current.board_size),
                    wall_mode: select_value(&document, "wall-mode")
                        .and_then(|v| WallMode::from_str(&v))
                        .unwrap_or(current.wall_mode),
                    difficulty_curve: select_value(&document, "difficulty")
                        .and_then(|v| DifficultyCurve::from_str(&v))
                        .unwrap_or(current.difficulty_curve),
                };
                let seed = js_sys::Date::now() as u64;
                g.session.apply_settings(settings, seed);
            });
            let _ = select.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    game.borrow_mut().session.pause();
                    log::info!("Auto-paused (tab hidden)");
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().session.pause();
                log::info!("Auto-paused (window blur)");
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().update(time);
        request_animation_frame(game);
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
fn main() {
    env_logger::init();
    log::info!("Grid Snake (native) starting...");
    log::info!("Native mode runs a headless autopilot - run with `trunk serve` for the web version");

    let summary = native::run_autopilot(2024, 120_000.0);
    println!(
        "Autopilot finished: score {}, level {}, length {}",
        summary.score, summary.level, summary.length
    );
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use grid_snake::Session;
    use grid_snake::persistence::MemoryStore;
    use grid_snake::sim::{Direction, GameState, ItemKind, check_collision};

    /// Display refresh the fixed timer pretends to run at
    const FRAME_MS: f64 = 1000.0 / 60.0;

    pub struct AutopilotSummary {
        pub score: u64,
        pub level: u32,
        pub length: usize,
    }

    /// Play one game on a fixed timer until it ends or `duration_ms` passes
    pub fn run_autopilot(seed: u64, duration_ms: f64) -> AutopilotSummary {
        let mut session = Session::new(MemoryStore::new(), seed);
        let mut now = 0.0;

        while now < duration_ms && session.game_over().is_none() {
            if session.state().direction_queue.is_empty() {
                if let Some(dir) = choose_direction(session.state(), now) {
                    session.steer(dir);
                }
            }
            session.frame(now);
            for event in session.drain_events() {
                log::debug!("{:.0}ms {:?}", now, event);
            }
            now += FRAME_MS;
        }

        let state = session.state();
        AutopilotSummary {
            score: state.score,
            level: state.level,
            length: state.snake.len(),
        }
    }

    /// Greedy: the safe move that gets closest to the food
    fn choose_direction(state: &GameState, now: f64) -> Option<Direction> {
        let head = state.head();
        let target = state.food?;
        let ghost = state.is_effect_active(ItemKind::Ghost, now);

        let candidates = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];
        let best = candidates
            .into_iter()
            .filter(|dir| *dir != state.direction.opposite())
            .filter_map(|dir| {
                let next = state.board.step(head, dir);
                let blocked = check_collision(next, &state.board, &state.snake, &state.obstacles, ghost)
                    .is_some()
                    || state.pending_obstacles.iter().any(|o| o.pos == next);
                if blocked {
                    None
                } else {
                    let dist = (target - next).abs();
                    Some((dir, dist.x + dist.y))
                }
            })
            .min_by_key(|(_, dist)| *dist)
            .map(|(dir, _)| dir)?;

        if best == state.direction { None } else { Some(best) }
    }
}
