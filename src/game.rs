//! Round controller
//!
//! Owns the simulation state and the host capabilities (renderer, HUD sink,
//! frame scheduler). Hosts feed input into the snapshot, call `start` on the
//! start command and `frame` from each scheduled frame callback.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::platform::{FrameHandle, FrameScheduler, InputState};
use crate::renderer::{Renderer, draw_frame};
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, tick};
use crate::tuning::{Config, ConfigError};
use crate::ui::{Outcome, UiSink};

/// Game instance holding the state and its collaborators
pub struct Game<R: Renderer, U: UiSink, S: FrameScheduler> {
    state: GameState,
    settings: Settings,
    input: InputState,
    renderer: R,
    ui: U,
    scheduler: S,
    /// Outstanding frame request, if any
    pending_frame: Option<FrameHandle>,
    last_frame_ms: Option<f64>,
    accumulator: f32,
    /// Events from the latest frame (or from direct `step` calls since)
    events: Vec<GameEvent>,
    // Last values pushed to the HUD
    shown_score: u64,
    shown_lives: u8,
}

impl<R: Renderer, U: UiSink, S: FrameScheduler> Game<R, U, S> {
    /// New game in `Idle`; the HUD is primed with the starting score and lives.
    ///
    /// Fails if the tuning does not validate.
    pub fn new(
        config: Config,
        seed: u64,
        renderer: R,
        ui: U,
        scheduler: S,
    ) -> Result<Self, ConfigError> {
        let state = GameState::new(seed, config.tuning, config.settings.max_particles())?;
        let mut game = Self {
            shown_score: state.score,
            shown_lives: state.lives,
            state,
            settings: config.settings,
            input: InputState::new(),
            renderer,
            ui,
            scheduler,
            pending_frame: None,
            last_frame_ms: None,
            accumulator: 0.0,
            events: Vec::new(),
        };
        game.push_hud(true);
        Ok(game)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn is_running(&self) -> bool {
        self.state.phase == GamePhase::Running
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    pub fn set_paddle_target(&mut self, x: f32) {
        self.input.set_paddle_target(x);
    }

    pub fn set_direction(&mut self, left: bool, right: bool) {
        self.input.set_direction(left, right);
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// The frame request the loop is waiting on
    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending_frame
    }

    /// Take the buffered events. Each frame starts a fresh buffer, so hosts
    /// that care must drain after every `frame`.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Begin a fresh round from any phase.
    ///
    /// Any outstanding frame request is cancelled first, so calling this
    /// repeatedly still leaves exactly one loop scheduled.
    pub fn start(&mut self) {
        self.cancel_pending();
        self.state.start_round();
        self.input.reset();
        self.accumulator = 0.0;
        self.last_frame_ms = None;
        self.events.clear();

        self.ui.hide_overlay();
        self.push_hud(true);
        log::info!(
            "Round started (seed {}, {} bricks)",
            self.state.seed,
            self.state.bricks_remaining()
        );

        self.schedule();
    }

    /// Run one simulation tick. Returns true while the round is still running.
    pub fn step(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        let input = self.input.tick_input();
        tick(&mut self.state, &input);
        self.events.extend(self.state.drain_events());
        self.push_hud(false);

        if let Some(outcome) = Outcome::from_phase(self.state.phase) {
            self.end_round(outcome);
            return false;
        }
        true
    }

    /// Scheduled frame callback: catch the sim up to `now_ms`, draw once,
    /// and request the next frame while the round runs.
    pub fn frame(&mut self, now_ms: f64) {
        // The request that invoked us has fired
        self.pending_frame = None;
        if !self.is_running() {
            return;
        }
        self.events.clear();

        let dt = match self.last_frame_ms {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => SIM_DT,
        };
        self.last_frame_ms = Some(now_ms);
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            substeps += 1;
            if !self.step() {
                break;
            }
        }
        if substeps == MAX_SUBSTEPS {
            // Drop the backlog rather than spiral
            self.accumulator = self.accumulator.min(SIM_DT);
        }

        self.draw();

        if self.is_running() {
            self.schedule();
        }
    }

    /// Draw the current state
    pub fn draw(&mut self) {
        draw_frame(&self.state, &self.settings, &mut self.renderer);
    }

    fn schedule(&mut self) {
        match self.scheduler.request_frame() {
            Some(handle) => self.pending_frame = Some(handle),
            None => log::warn!("Host refused a frame request; loop stalled"),
        }
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending_frame.take() {
            self.scheduler.cancel_frame(handle);
        }
    }

    fn end_round(&mut self, outcome: Outcome) {
        self.cancel_pending();
        self.input.reset();
        log::info!(
            "Round over: {:?} with score {} after {} ticks",
            outcome,
            self.state.score,
            self.state.time_ticks
        );
        self.ui.show_overlay(outcome.title(), outcome.message());
    }

    /// Push score/lives to the HUD when they changed (or always, if forced)
    fn push_hud(&mut self, force: bool) {
        if force || self.state.score != self.shown_score {
            self.shown_score = self.state.score;
            self.ui.set_score(self.state.score);
        }
        if force || self.state.lives != self.shown_lives {
            self.shown_lives = self.state.lives;
            self.ui.set_lives(self.state.lives);
        }
    }
}
