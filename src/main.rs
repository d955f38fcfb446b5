//! Shoot 'Em Up entry point
//!
//! Browser builds bootstrap a canvas and run the frame loop. Native builds run
//! a headless autopilot session, which exercises the full update path and the
//! file-backed high score.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, KeyboardEvent, MouseEvent,
    };

    use shoot_em_up::Game;
    use shoot_em_up::consts::*;
    use shoot_em_up::persistence::LocalStorageStore;
    use shoot_em_up::platform::input::{CAPTURED_KEYS, normalize_key};
    use shoot_em_up::renderer::{Assets, CanvasSurface, SPRITES};

    /// Everything the frame callback touches
    struct App {
        game: Game<LocalStorageStore>,
        surface: CanvasSurface,
        assets: Assets<HtmlImageElement>,
    }

    type Shared = Rc<RefCell<App>>;

    fn js_err(msg: &str) -> JsValue {
        JsValue::from_str(msg)
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(err) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("console_log init failed: {err}").into());
        }
        log::info!("Shoot 'Em Up starting...");

        let window = web_sys::window().ok_or_else(|| js_err("no window"))?;
        let document = window.document().ok_or_else(|| js_err("no document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game")
            .or_else(|| document.get_element_by_id("canvas"))
            .ok_or_else(|| js_err("no canvas"))?
            .dyn_into()?;
        canvas.set_width(CANVAS_WIDTH as u32);
        canvas.set_height(CANVAS_HEIGHT as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| js_err("2d context unavailable"))?
            .dyn_into()?;

        let seed = js_sys::Date::now() as u64;
        let app = Rc::new(RefCell::new(App {
            game: Game::new(seed, LocalStorageStore),
            surface: CanvasSurface::new(ctx),
            assets: Assets::new(),
        }));
        log::info!("Game initialized with seed: {}", seed);

        load_sprites(&app)?;
        setup_input_handlers(&canvas, &app)?;
        request_animation_frame(app);

        log::info!("Shoot 'Em Up running!");
        Ok(())
    }

    fn load_sprites(app: &Shared) -> Result<(), JsValue> {
        for (name, src) in SPRITES {
            let img = HtmlImageElement::new()?;
            for (event, loaded) in [("load", true), ("error", false)] {
                let app = app.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                    app.borrow_mut().assets.mark(name, loaded);
                });
                img.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
                closure.forget();
            }
            img.set_src(src);
            app.borrow_mut().assets.insert(name, img);
        }
        Ok(())
    }

    /// Mouse position in canvas pixels, accounting for CSS scaling
    fn canvas_point(canvas: &HtmlCanvasElement, event: &MouseEvent) -> Vec2 {
        let rect = canvas.get_bounding_client_rect();
        let sx = if rect.width() > 0.0 {
            canvas.width() as f64 / rect.width()
        } else {
            1.0
        };
        let sy = if rect.height() > 0.0 {
            canvas.height() as f64 / rect.height()
        } else {
            1.0
        };
        Vec2::new(
            ((event.client_x() as f64 - rect.left()) * sx) as f32,
            ((event.client_y() as f64 - rect.top()) * sy) as f32,
        )
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: &Shared) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| js_err("no window"))?;

        // Keyboard
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = normalize_key(&event.key());
                if CAPTURED_KEYS.contains(&key.as_str()) {
                    event.prevent_default();
                }
                app.borrow_mut().game.input.key_down(&key);
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                app.borrow_mut().game.input.key_up(&event.key());
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Mouse
        {
            let app = app.clone();
            let target = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let pos = canvas_point(&target, &event);
                app.borrow_mut().game.input.pointer_moved(pos);
            });
            canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        for (event_name, down) in [("mousedown", true), ("mouseup", false)] {
            let app = app.clone();
            let target = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                if event.button() != 0 {
                    return;
                }
                let pos = canvas_point(&target, &event);
                let mut a = app.borrow_mut();
                a.game.input.pointer_moved(pos);
                a.game.input.button(down);
            });
            canvas.add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Window blur: drop held keys so the ship does not keep firing
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                app.borrow_mut().game.input.release_all();
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn request_animation_frame(app: Shared) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Shared, time: f64) {
        {
            let mut guard = app.borrow_mut();
            let App {
                game,
                surface,
                assets,
            } = &mut *guard;
            game.frame(time, surface, assets);
        }
        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
#[derive(clap::Parser, Debug)]
#[command(name = "shoot-em-up")]
#[command(about = "Headless autopilot run of the shooter simulation")]
struct Cli {
    /// Simulated seconds to play
    #[arg(long, default_value_t = 60.0)]
    seconds: f32,
    /// Simulation seed
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Directory holding the saved high score and settings
    #[arg(long, env = "SHOOT_EM_UP_DATA", default_value = ".shoot-em-up")]
    data_dir: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::{CommandFactory, Parser};

    env_logger::init();
    let cli = Cli::parse();
    if !cli.seconds.is_finite() || cli.seconds < 0.0 {
        Cli::command()
            .error(
                clap::error::ErrorKind::ValueValidation,
                "--seconds must be a non-negative number",
            )
            .exit();
    }
    log::info!("Shoot 'Em Up (native) starting...");

    let store = shoot_em_up::persistence::FileStore::new(cli.data_dir);
    let summary = autopilot::run(store, cli.seed, cli.seconds);
    println!(
        "score {} | kills {} | stage {} | lives {} | bosses {}/{} | best {}",
        summary.score,
        summary.kills,
        summary.stage,
        summary.lives,
        summary.bosses_defeated,
        summary.bosses_spawned,
        summary.best
    );
}

/// Headless demo player
#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use glam::Vec2;
    use shoot_em_up::Game;
    use shoot_em_up::consts::*;
    use shoot_em_up::persistence::Storage;
    use shoot_em_up::sim::{GameEvent, GameState, Mode};

    const STEP: f32 = 1.0 / 60.0;

    pub struct Summary {
        pub score: u64,
        pub kills: u32,
        pub stage: u8,
        pub lives: u32,
        pub bosses_spawned: u32,
        pub bosses_defeated: u32,
        pub best: u64,
    }

    /// Line up under the lowest enemy, keeping clear of enemy bullets
    fn aim(state: &GameState) -> Vec2 {
        let ship = state.player.center();
        let target_x = state
            .enemies
            .iter()
            .filter(|e| e.pos.y > -e.size.y)
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .map(|e| e.center().x)
            .unwrap_or(CANVAS_WIDTH / 2.0);
        let threat = state
            .enemy_bullets
            .iter()
            .filter(|b| b.pos.y < ship.y && (b.pos.x - ship.x).abs() < 30.0)
            .min_by(|a, b| (ship.y - a.pos.y).total_cmp(&(ship.y - b.pos.y)));
        let x = match threat {
            Some(b) if ship.y - b.pos.y < 120.0 => ship.x + if b.pos.x > ship.x { -60.0 } else { 60.0 },
            _ => target_x,
        };
        Vec2::new(x.clamp(0.0, CANVAS_WIDTH), CANVAS_HEIGHT - 60.0)
    }

    pub fn run<St: Storage>(store: St, seed: u64, seconds: f32) -> Summary {
        let mut game = Game::new(seed, store);
        let mut bosses_spawned = 0;
        let mut bosses_defeated = 0;

        // Start from the title menu
        game.input.key_down("Enter");
        game.update(STEP);
        game.input.key_up("Enter");
        game.input.key_down(" ");

        let steps = (seconds / STEP) as u32;
        for _ in 0..steps {
            let target = aim(&game.state);
            game.input.pointer_moved(target);
            for event in game.update(STEP) {
                match event {
                    GameEvent::BossSpawned => bosses_spawned += 1,
                    GameEvent::BossDefeated => bosses_defeated += 1,
                    _ => {}
                }
            }
            if game.state.mode == Mode::GameOver {
                break;
            }
        }
        if game.state.mode == Mode::Playing {
            log::info!("Time limit reached");
        }

        Summary {
            score: game.state.score,
            kills: game.state.kills,
            stage: game.state.stage(),
            lives: game.state.player.lives,
            bosses_spawned,
            bosses_defeated,
            best: game.high_score(),
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use clap::{CommandFactory, Parser};

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::try_parse_from([
            "shoot-em-up",
            "--seconds",
            "2.5",
            "--seed",
            "7",
            "--data-dir",
            "/tmp/scores",
        ])
        .unwrap();
        assert_eq!(cli.seconds, 2.5);
        assert_eq!(cli.seed, 7);
        assert_eq!(cli.data_dir, std::path::PathBuf::from("/tmp/scores"));
    }

    #[test]
    fn test_cli_rejects_malformed_numbers() {
        assert!(Cli::try_parse_from(["shoot-em-up", "--seconds", "3O"]).is_err());
        assert!(Cli::try_parse_from(["shoot-em-up", "--seed", "-1"]).is_err());
        assert!(Cli::try_parse_from(["shoot-em-up", "30"]).is_err());
    }

    #[test]
    fn test_autopilot_short_run() {
        let store = shoot_em_up::persistence::MemoryStore::new();
        let summary = autopilot::run(store, 3, 2.0);
        // One second of invincibility per hit caps the damage taken
        assert!(summary.lives >= 2);
        assert_eq!(summary.stage, 0);
        // No game over, so nothing was submitted
        assert_eq!(summary.best, 0);
    }
}
