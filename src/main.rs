//! Neon Breaker entry point
//!
//! The browser build wires the DOM to a `Game`; the native build plays a
//! round headless on autopilot and prints a summary.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use neon_breaker::platform::key_direction;
    use neon_breaker::platform::web::{DomUi, FrameCallback, RafScheduler};
    use neon_breaker::renderer::CanvasRenderer;
    use neon_breaker::{Config, Game};

    type WebGame = Game<CanvasRenderer, DomUi, RafScheduler>;

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger init failed: {e}").into());
        }

        log::info!("Neon Breaker starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or("no #gameCanvas")?
            .dyn_into()?;

        let config = Config::default();
        canvas.set_width(config.tuning.field_width as u32);
        canvas.set_height(config.tuning.field_height as u32);

        let renderer = CanvasRenderer::new(&canvas)?;
        let ui = DomUi::new(document.clone())?;
        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let scheduler = RafScheduler::new(window.clone(), callback.clone());

        let seed = (js_sys::Math::random() * u32::MAX as f64) as u64;
        let game = Game::new(config, seed, renderer, ui, scheduler)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let game: Rc<RefCell<WebGame>> = Rc::new(RefCell::new(game));

        // Frame callback, requested by the scheduler while a round runs
        {
            let game = game.clone();
            *callback.borrow_mut() = Some(Closure::<dyn FnMut(f64)>::new(move |time: f64| {
                game.borrow_mut().frame(time);
            }));
        }

        setup_input_handlers(&window, &canvas, game.clone())?;
        setup_start_button(&document, game.clone())?;

        // Idle until the start command; show the first layout behind the overlay
        game.borrow_mut().draw();
        Ok(())
    }

    fn setup_input_handlers(
        window: &web_sys::Window,
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<WebGame>>,
    ) -> Result<(), JsValue> {
        // Pointer - map client x into playfield pixels
        {
            let game = game.clone();
            let canvas = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let rect = canvas.get_bounding_client_rect();
                if rect.width() <= 0.0 {
                    return;
                }
                let scale = canvas.width() as f64 / rect.width();
                let x = (event.client_x() as f64 - rect.left()) * scale;
                game.borrow_mut().set_paddle_target(x as f32);
            });
            window.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let key = event.key();
                if let Some(direction) = key_direction(&key) {
                    g.input_mut().set_held(direction, true);
                    return;
                }
                if matches!(key.as_str(), "i" | "I") && !event.repeat() {
                    let on = g.input_mut().toggle_autopilot();
                    log::info!("Autopilot: {}", on);
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(direction) = key_direction(&event.key()) {
                    game.borrow_mut().input_mut().set_held(direction, false);
                }
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn setup_start_button(
        document: &web_sys::Document,
        game: Rc<RefCell<WebGame>>,
    ) -> Result<(), JsValue> {
        let btn = document.get_element_by_id("start-btn").ok_or("no #start-btn")?;
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            game.borrow_mut().start();
        });
        btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_game::run() {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Simulated display frames before the native runner gives up (30 minutes)
#[cfg(not(target_arch = "wasm32"))]
const MAX_FRAMES: u64 = 60 * 60 * 30;

#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, serde::Serialize)]
struct Summary {
    seed: u64,
    phase: neon_breaker::sim::GamePhase,
    score: u64,
    lives: u8,
    ticks: u64,
    frames: u64,
    bricks_remaining: usize,
    bricks_destroyed: u32,
    power_ups_collected: u32,
    balls_lost: u32,
}

/// Usage: `neon-breaker [SEED] [CONFIG.json]`
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    if let Err(e) = run_native() {
        log::error!("{}", e);
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn run_native() -> Result<(), Box<dyn std::error::Error>> {
    use neon_breaker::platform::ManualScheduler;
    use neon_breaker::renderer::DrawList;
    use neon_breaker::sim::GameEvent;
    use neon_breaker::ui::UiLog;
    use neon_breaker::{Config, Game, Settings};

    let mut args = std::env::args().skip(1);
    let seed = match args.next() {
        Some(arg) => arg.parse::<u64>()?,
        None => rand::random(),
    };
    let config = match args.next() {
        Some(path) => Config::load(path)?,
        None => Config {
            settings: Settings::headless(),
            ..Default::default()
        },
    };

    log::info!("Neon Breaker (native) starting, seed {}", seed);
    let mut game = Game::new(config, seed, DrawList::new(), UiLog::new(), ManualScheduler::new())?;
    game.input_mut().set_autopilot(true);
    game.start();

    let frame_ms = 1000.0 / 60.0;
    let mut frames = 0;
    let (mut bricks_destroyed, mut power_ups_collected, mut balls_lost) = (0, 0, 0);
    while frames < MAX_FRAMES && game.scheduler_mut().fire().is_some() {
        frames += 1;
        game.frame(frames as f64 * frame_ms);
        for event in game.take_events() {
            match event {
                GameEvent::BrickDestroyed { .. } => bricks_destroyed += 1,
                GameEvent::PowerUpCollected { .. } => power_ups_collected += 1,
                GameEvent::BallLost => balls_lost += 1,
                _ => {}
            }
        }
    }
    if game.is_running() {
        log::warn!("Gave up after {} frames", frames);
    }

    let state = game.state();
    let summary = Summary {
        seed,
        phase: state.phase,
        score: state.score,
        lives: state.lives,
        ticks: state.time_ticks,
        frames,
        bricks_remaining: state.bricks_remaining(),
        bricks_destroyed,
        power_ups_collected,
        balls_lost,
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
