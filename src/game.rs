//! Game session
//!
//! Owns the simulation plus everything around it: frame clock, raw input,
//! renderer, settings and storage. One `frame` call is one update followed
//! by one render.

use crate::highscores::HighScore;
use crate::persistence::Storage;
use crate::platform::{FrameClock, InputState};
use crate::renderer::{Assets, Renderer, Surface};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, tick};

pub struct Game<St: Storage> {
    pub state: GameState,
    pub input: InputState,
    settings: Settings,
    clock: FrameClock,
    renderer: Renderer,
    high_score: HighScore,
    store: St,
}

impl<St: Storage> Game<St> {
    /// New session on the title screen, with settings and high score loaded from `store`
    pub fn new(seed: u64, store: St) -> Self {
        let settings = Settings::load(&store);
        let high_score = HighScore::load(&store);
        log::info!(
            "Session start: quality {}, high score {}",
            settings.quality.as_str(),
            high_score.best
        );
        Self {
            state: GameState::new(seed, high_score.best, settings.star_count()),
            input: InputState::new(),
            settings,
            clock: FrameClock::new(),
            renderer: Renderer::new(seed ^ 0x5eed),
            high_score,
            store,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace and persist settings. Star density applies from the next run.
    pub fn set_settings(&mut self, settings: Settings) {
        self.state.star_count = settings.star_count();
        self.settings = settings;
        self.settings.save(&mut self.store);
    }

    pub fn high_score(&self) -> u64 {
        self.high_score.best
    }

    pub fn store(&self) -> &St {
        &self.store
    }

    pub fn fps(&self) -> f32 {
        self.clock.fps()
    }

    /// Advance by `dt` seconds using the input gathered since the last update.
    /// Returns the events raised during the tick.
    pub fn update(&mut self, dt: f32) -> Vec<GameEvent> {
        let input = self.input.snapshot();
        tick(&mut self.state, &input, dt);
        let events = self.state.drain_events();
        for event in &events {
            self.handle_event(event);
        }
        events
    }

    fn handle_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::NewHighScore(score) => {
                self.high_score.submit(*score, &mut self.store);
            }
            GameEvent::GameOver { score } => {
                log::info!("Final score {score} (best {})", self.high_score.best);
            }
            GameEvent::BossSpawned => log::debug!("Boss on the field"),
            GameEvent::BossDefeated => log::debug!("Boss down"),
            GameEvent::StageAlert(level) => log::debug!("Alert level {level} shown"),
        }
    }

    /// Draw the current state
    pub fn render<S: Surface>(&mut self, surface: &mut S, assets: &Assets<S::Image>) {
        let fps = self.clock.fps();
        self.renderer
            .draw(&self.state, &self.settings, assets, surface, fps);
    }

    /// One host frame: clamp the time step, update, then render
    pub fn frame<S: Surface>(
        &mut self,
        timestamp_ms: f64,
        surface: &mut S,
        assets: &Assets<S::Image>,
    ) -> Vec<GameEvent> {
        let dt = self.clock.advance(timestamp_ms);
        let events = self.update(dt);
        self.render(surface, assets);
        events
    }
}
