//! Gift Grab entry point
//!
//! In the browser this wires the page (canvas, buttons, perception engine)
//! to the simulation and runs the animation-frame loop. Natively it plays a
//! headless demo session and logs the result.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Document, HtmlCanvasElement, HtmlElement, KeyboardEvent, MouseEvent};

    use gift_grab::Settings;
    use gift_grab::gesture::{
        CursorReader, CursorSlot, CursorState, CursorWriter, HandLandmarks, HandTracker,
        PerceptionError, SessionLaunch,
    };
    use gift_grab::highscores::LocalStorageStore;
    use gift_grab::renderer::{CanvasSurface, Renderer};
    use gift_grab::sim::{Autopilot, GameEvent, SessionPhase, SimulationClock};

    /// Nominal frame length used to pace the demo hand
    const DEMO_FRAME_MS: f32 = 1000.0 / 60.0;
    /// How long a banner message stays on screen
    const MESSAGE_MS: i32 = 1000;

    // Bridge to the page's perception engine (camera + hand landmark model).
    // The page registers `window.giftGrabPerception = { start, stop }` and
    // forwards every detection batch to the exported `on_hand_results`.
    #[wasm_bindgen(inline_js = "
        export function start_perception() {
            const engine = window.giftGrabPerception;
            if (engine && typeof engine.start === 'function') {
                return Promise.resolve(engine.start());
            }
            return Promise.reject(new Error('perception engine not loaded'));
        }

        export function stop_perception() {
            const engine = window.giftGrabPerception;
            if (engine && typeof engine.stop === 'function') {
                engine.stop();
            }
        }
    ")]
    extern "C" {
        fn start_perception() -> js_sys::Promise;
        fn stop_perception();
    }

    /// Perception side: the only writer of the cursor slot
    struct Perception {
        tracker: HandTracker,
        writer: CursorWriter,
        canvas: Vec2,
        show_readout: bool,
    }

    /// Simulation side: reads the cursor once per frame
    struct Game {
        sim: SimulationClock,
        renderer: Renderer,
        surface: CanvasSurface,
        settings: Settings,
        cursor: CursorReader,
        autopilot: Option<Autopilot>,
    }

    thread_local! {
        static PERCEPTION: RefCell<Option<Perception>> = const { RefCell::new(None) };
    }

    pub fn js_error(e: impl std::fmt::Display) -> JsValue {
        JsValue::from_str(&e.to_string())
    }

    /// Classify a rejected perception start
    fn perception_error(err: JsValue) -> PerceptionError {
        if let Some(error) = err.dyn_ref::<js_sys::Error>() {
            let name = String::from(error.name());
            if name == "NotAllowedError" || name == "SecurityError" {
                return PerceptionError::PermissionDenied;
            }
            return PerceptionError::Unavailable(String::from(error.message()));
        }
        PerceptionError::Unavailable(format!("{:?}", err))
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_hidden(document: &Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let classes = el.class_list();
            let _ = if hidden {
                classes.add_1("hidden")
            } else {
                classes.remove_1("hidden")
            };
        }
    }

    fn set_display(document: &Document, id: &str, display: &str) {
        if let Some(el) = document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            let _ = el.style().set_property("display", display);
        }
    }

    /// Floating banner in the middle of the page, removed after a second
    fn show_message(document: &Document, text: &str, color: &str) {
        let Ok(el) = document.create_element("div") else {
            return;
        };
        el.set_class_name("game-message");
        el.set_text_content(Some(text));
        if let Ok(html) = el.clone().dyn_into::<HtmlElement>() {
            html.style().set_css_text(&format!(
                "position: absolute; color: {color}; font-size: 36px; font-weight: bold; \
                 text-shadow: 0 0 10px rgba(0,0,0,0.5); left: 50%; top: 50%; \
                 transform: translate(-50%, -50%); pointer-events: none; \
                 animation: fadeUp 1s ease-out forwards;"
            ));
        }
        let Some(body) = document.body() else {
            return;
        };
        if body.append_child(&el).is_err() {
            return;
        }
        let remove = Closure::once(move || el.remove());
        if let Some(window) = web_sys::window() {
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                remove.as_ref().unchecked_ref(),
                MESSAGE_MS,
            );
        }
        remove.forget();
    }

    impl Game {
        fn frame(&mut self, time: f64) {
            let cursor = match self.autopilot.as_mut() {
                Some(pilot) => pilot.steer(&self.sim.state, DEMO_FRAME_MS),
                None => self.cursor.latest(),
            };
            self.sim.frame(time, cursor);
            self.renderer
                .render(&mut self.surface, &self.sim.state, cursor, time, &self.settings);
            self.apply_events();
        }

        /// Reflect drained simulation events in the page
        fn apply_events(&mut self) {
            let events = self.sim.drain_events();
            if events.is_empty() {
                return;
            }
            let Some(document) = document() else {
                return;
            };
            for event in events {
                match event {
                    GameEvent::SessionStarted => {
                        set_hidden(&document, "menuOverlay", true);
                        set_hidden(&document, "gameOverOverlay", true);
                        set_hidden(&document, "combo", true);
                        set_text(&document, "scoreValue", "0");
                    }
                    GameEvent::ScoreChanged { total, .. } => {
                        set_text(&document, "scoreValue", &total.to_string());
                    }
                    GameEvent::ComboChanged(streak) => {
                        if streak > 1 {
                            set_hidden(&document, "combo", false);
                            set_text(&document, "comboValue", &streak.to_string());
                        } else {
                            set_hidden(&document, "combo", true);
                        }
                    }
                    GameEvent::TierChanged(tier) => {
                        log::info!("Difficulty now {}", tier.as_str());
                    }
                    GameEvent::Stolen => {}
                    GameEvent::Message { text, color } => show_message(&document, &text, color),
                    GameEvent::SessionEnded { final_score, .. } => {
                        stop_tracking();
                        set_text(&document, "finalScore", &final_score.to_string());
                        set_text(&document, "highScoreValue", &self.sim.high_score().to_string());
                        set_hidden(&document, "gameOverOverlay", false);
                    }
                }
            }
        }

        fn resize(&mut self, width: u32, height: u32) {
            self.surface.resize(width, height);
            self.sim.resize(width as f32, height as f32);
        }

        fn toggle_demo(&mut self) {
            if self.autopilot.take().is_some() {
                log::info!("Demo mode off");
                return;
            }
            self.autopilot = Some(Autopilot::for_canvas(self.sim.state.canvas));
            log::info!("Demo mode on");
            if self.sim.phase() != SessionPhase::Active {
                self.sim.start(js_sys::Date::now() as u64);
            }
        }
    }

    /// Perception callback: throttle, filter, publish, update the readout
    pub fn on_hand_results(timestamp: f64, landmarks: Vec<f32>, hand_count: usize) {
        let hands = HandLandmarks::split_flat(&landmarks, hand_count);
        let update = PERCEPTION.with(|p| {
            let mut p = p.borrow_mut();
            let p = p.as_mut()?;
            let cursor = p.tracker.on_results(timestamp, &hands, p.canvas)?;
            p.writer.publish(cursor);
            Some((cursor, p.show_readout))
        });
        if let Some((cursor, true)) = update {
            if let Some(document) = document() {
                set_text(&document, "handPosition", &hand_readout(cursor));
            }
        }
    }

    fn hand_readout(cursor: CursorState) -> String {
        format!(
            "Hand: ({:.0}, {:.0}) {}",
            cursor.pos.x,
            cursor.pos.y,
            if cursor.grabbing { "✊" } else { "✋" }
        )
    }

    fn window_size(window: &web_sys::Window) -> (u32, u32) {
        let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        (
            dim(window.inner_width()) as u32,
            dim(window.inner_height()) as u32,
        )
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).map_err(js_error)?;

        log::info!("Gift Grab starting...");

        let window = web_sys::window().ok_or_else(|| js_error("no window"))?;
        let document = window.document().ok_or_else(|| js_error("no document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or_else(|| js_error("no canvas"))?
            .dyn_into()
            .map_err(|_| js_error("gameCanvas is not a canvas"))?;
        let (width, height) = window_size(&window);
        canvas.set_width(width);
        canvas.set_height(height);
        let canvas_size = Vec2::new(width as f32, height as f32);

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let (writer, reader) = CursorSlot::new();

        PERCEPTION.with(|p| {
            *p.borrow_mut() = Some(Perception {
                tracker: HandTracker::from_settings(&settings),
                writer,
                canvas: canvas_size,
                show_readout: settings.show_hand_readout,
            });
        });

        let sim = SimulationClock::new(seed, canvas_size, Box::new(LocalStorageStore));
        set_text(&document, "highScoreValue", &sim.high_score().to_string());

        let game = Rc::new(RefCell::new(Game {
            sim,
            renderer: Renderer::new(seed),
            surface: CanvasSurface::new(canvas).map_err(js_error)?,
            settings,
            cursor: reader,
            autopilot: None,
        }));
        log::info!("Game initialized with seed: {}", seed);

        setup_play_button(&document, game.clone());
        setup_restart_button(&document, game.clone());
        setup_keyboard(&window, game.clone());
        setup_resize(&window, game.clone());

        request_animation_frame(game);
        log::info!("Gift Grab running!");
        Ok(())
    }

    /// Tracker gate, `None` before the page is wired up
    fn session_launch() -> Option<SessionLaunch> {
        PERCEPTION.with(|p| p.borrow().as_ref().map(|p| p.tracker.session_launch()))
    }

    /// Stop the tracker and, if it was live, the perception engine
    fn stop_tracking() {
        if PERCEPTION.with(|p| p.borrow_mut().as_mut().is_some_and(|p| p.tracker.stop())) {
            stop_perception();
        }
    }

    /// Bring up hand tracking if needed, then start the session. The session
    /// only starts once the tracker reports it is running.
    async fn start_with_tracking(game: Rc<RefCell<Game>>) {
        let Some(launch) = session_launch() else {
            return;
        };
        if launch == SessionLaunch::Pending {
            log::debug!("Hand tracking start already in flight");
            return;
        }
        let Some(document) = document() else {
            return;
        };
        set_display(&document, "playButton", "none");
        set_display(&document, "loadingText", "block");
        set_text(&document, "loadingText", "Loading hand tracking...");

        let must_start = launch == SessionLaunch::StartTracking
            && PERCEPTION.with(|p| {
                p.borrow_mut()
                    .as_mut()
                    .is_some_and(|p| p.tracker.request_start())
            });

        let result = if must_start {
            let outcome = JsFuture::from(start_perception())
                .await
                .map(|_| ())
                .map_err(perception_error);
            PERCEPTION.with(|p| match p.borrow_mut().as_mut() {
                Some(p) => p.tracker.start_resolved(outcome),
                None => outcome,
            })
        } else {
            Ok(())
        };

        set_display(&document, "loadingText", "none");
        let mut g = game.borrow_mut();
        match result {
            Ok(()) if session_launch() == Some(SessionLaunch::Ready) => {
                g.sim.start(js_sys::Date::now() as u64);
            }
            Ok(()) => {
                // Stopped while the engine was coming up
                log::info!("Hand tracking stopped before the session could start");
                set_display(&document, "playButton", "block");
            }
            Err(e) => {
                log::error!("Failed to start camera: {}", e);
                let text = match e {
                    PerceptionError::PermissionDenied => "Camera permission denied!",
                    PerceptionError::Unavailable(_) => "Hand tracking unavailable!",
                };
                g.sim.state.message(text, "#FF0000");
                set_display(&document, "playButton", "block");
            }
        }
    }

    fn setup_play_button(document: &Document, game: Rc<RefCell<Game>>) {
        if let Some(btn) = document.get_element_by_id("playButton") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                wasm_bindgen_futures::spawn_local(start_with_tracking(game.clone()));
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_restart_button(document: &Document, game: Rc<RefCell<Game>>) {
        if let Some(btn) = document.get_element_by_id("restartButton") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let demo = game.borrow().autopilot.is_some();
                if demo || session_launch() == Some(SessionLaunch::Ready) {
                    let seed = js_sys::Date::now() as u64;
                    if game.borrow_mut().sim.restart(seed) {
                        log::info!("Game restarted with seed: {}", seed);
                    }
                } else if game.borrow().sim.phase() == SessionPhase::Ended {
                    wasm_bindgen_futures::spawn_local(start_with_tracking(game.clone()));
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_keyboard(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let mut g = game.borrow_mut();
            match event.key().as_str() {
                "d" | "D" => g.toggle_demo(),
                "Escape" => {
                    g.sim.abort();
                    stop_tracking();
                }
                "s" | "S" => {
                    g.settings.starfield = !g.settings.starfield;
                    g.settings.save();
                }
                _ => {}
            }
        });
        let _ =
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_resize(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        let window_clone = window.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let (width, height) = window_size(&window_clone);
            game.borrow_mut().resize(width, height);
            PERCEPTION.with(|p| {
                if let Some(p) = p.borrow_mut().as_mut() {
                    p.canvas = Vec2::new(width as f32, height as f32);
                }
            });
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().frame(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        web_sys::console::error_1(&e);
    }
}

/// Entry point for the page's perception engine: `landmarks` holds
/// `hand_count` hands of 21 `(x, y)` pairs each, normalized to [0, 1].
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn on_hand_results(timestamp: f64, landmarks: Vec<f32>, hand_count: usize) {
    wasm_game::on_hand_results(timestamp, landmarks, hand_count);
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(42);
    log::info!("Gift Grab (native) starting with seed {}", seed);
    log::info!("Hand tracking needs the browser build; playing a demo session instead");

    let score = demo::play(seed);
    println!("Demo finished: score {} (best {})", score.final_score, score.best);
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use glam::Vec2;

    use gift_grab::MemoryStore;
    use gift_grab::sim::{Autopilot, GameEvent, SessionPhase, SimulationClock};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Demo runs stop after five simulated minutes
    const MAX_FRAMES: u32 = 60 * 60 * 5;

    pub struct DemoResult {
        pub final_score: u64,
        pub best: u64,
    }

    pub fn play(seed: u64) -> DemoResult {
        let canvas = Vec2::new(1280.0, 720.0);
        let mut sim = SimulationClock::new(seed, canvas, Box::new(MemoryStore::new()));
        let mut pilot = Autopilot::for_canvas(canvas);
        sim.start(seed);

        let mut time = 0.0;
        for _ in 0..MAX_FRAMES {
            let cursor = pilot.steer(&sim.state, FRAME_MS as f32);
            sim.frame(time, cursor);
            time += FRAME_MS;
            report(sim.drain_events());
            if sim.phase() == SessionPhase::Ended {
                break;
            }
        }
        if sim.phase() == SessionPhase::Active {
            sim.abort();
            report(sim.drain_events());
        }

        DemoResult {
            final_score: sim.state.score,
            best: sim.high_score(),
        }
    }

    fn report(events: Vec<GameEvent>) {
        for event in events {
            match event {
                GameEvent::Message { text, .. } => log::info!("{}", text),
                GameEvent::SessionEnded {
                    final_score,
                    new_high_score,
                } => log::info!(
                    "Final score {}{}",
                    final_score,
                    if new_high_score { " (new high score)" } else { "" }
                ),
                other => log::debug!("{:?}", other),
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
