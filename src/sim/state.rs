//! Game state and core simulation types
//!
//! One `GameState` owns the player and every entity collection. It is only
//! mutated by `tick`; the renderer gets a shared reference.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::enemy::Enemy;
use super::entities::{EnemyBullet, Explosion, Player, PowerUp, Star, star_field};
use super::menu::MenuCursor;
use super::progression::{
    alert_level_for_kills, alert_message, power_tier_for_kills, stage_for_kills,
};
use crate::consts::*;
use crate::tick_down;

/// Top-level mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Title menu
    Intro,
    /// Controls screen
    Help,
    /// Active gameplay
    Playing,
    /// Frozen with the pause menu open
    Paused,
    /// "End current game?" prompt over the pause menu
    ConfirmEnd,
    /// Run ended
    GameOver,
}

/// Notable things that happened during a tick, drained by the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    GameOver { score: u64 },
    /// Score beat the stored high score (debug runs never emit this)
    NewHighScore(u64),
    BossSpawned,
    BossDefeated,
    /// Difficulty alert level reached (1-3)
    StageAlert(u8),
}

/// Timed on-screen banner
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub message: &'static str,
    pub timer: f32,
}

/// Camera shake request
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScreenShake {
    pub timer: f32,
    pub magnitude: f32,
}

impl ScreenShake {
    pub fn trigger(&mut self, (duration, magnitude): (f32, f32)) {
        self.timer = duration;
        self.magnitude = magnitude;
    }

    pub fn update(&mut self, dt: f32) {
        tick_down(&mut self.timer, dt);
    }

    pub fn is_active(&self) -> bool {
        self.timer > 0.0
    }
}

/// Kill-count cheat reachable from the pause menu
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DebugState {
    /// Player immune, high score frozen
    pub active: bool,
    /// Numeric prompt open
    pub entering: bool,
    pub buffer: String,
}

/// Highlight position of each menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Menus {
    pub intro: MenuCursor,
    pub pause: MenuCursor,
    pub confirm: MenuCursor,
}

impl Default for Menus {
    fn default() -> Self {
        Self {
            intro: MenuCursor::at(0),
            pause: MenuCursor::at(0),
            // "No" is preselected
            confirm: MenuCursor::at(1),
        }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub mode: Mode,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub enemy_bullets: Vec<EnemyBullet>,
    pub power_ups: Vec<PowerUp>,
    pub explosions: Vec<Explosion>,
    pub stars: Vec<Star>,
    /// Stars generated on reset
    pub star_count: usize,
    pub kills: u32,
    pub score: u64,
    pub high_score: u64,
    pub spawn_cooldown: f32,
    /// Kill count that triggers the next boss
    pub next_elite_at: u32,
    /// Highest difficulty alert already shown
    pub alert_level: u8,
    pub alert: Option<Alert>,
    pub extra_life_timer: f32,
    pub shake: ScreenShake,
    pub debug: DebugState,
    pub menus: Menus,
    /// Pending events (not part of the simulated world)
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Fresh state on the title screen
    pub fn new(seed: u64, high_score: u64, star_count: usize) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let stars = star_field(star_count, &mut rng);
        Self {
            mode: Mode::Intro,
            player: Player::default(),
            enemies: Vec::new(),
            enemy_bullets: Vec::new(),
            power_ups: Vec::new(),
            explosions: Vec::new(),
            stars,
            star_count,
            kills: 0,
            score: 0,
            high_score,
            spawn_cooldown: 0.0,
            next_elite_at: BOSS_FIRST_THRESHOLD,
            alert_level: 0,
            alert: None,
            extra_life_timer: 0.0,
            shake: ScreenShake::default(),
            debug: DebugState::default(),
            menus: Menus::default(),
            events: Vec::new(),
            rng,
        }
    }

    /// Start-of-run world. Mode and high score are left to the caller.
    pub fn reset(&mut self) {
        self.player = Player::default();
        self.enemies.clear();
        self.enemy_bullets.clear();
        self.power_ups.clear();
        self.explosions.clear();
        self.stars = star_field(self.star_count, &mut self.rng);
        self.kills = 0;
        self.score = 0;
        self.spawn_cooldown = 0.0;
        self.next_elite_at = BOSS_FIRST_THRESHOLD;
        self.alert_level = 0;
        self.alert = None;
        self.extra_life_timer = 0.0;
        self.shake = ScreenShake::default();
        self.debug = DebugState::default();
        self.menus = Menus::default();
    }

    /// Reset and enter play
    pub fn start_run(&mut self) {
        self.reset();
        self.mode = Mode::Playing;
        log::info!("Run started");
    }

    pub fn stage(&self) -> u8 {
        stage_for_kills(self.kills)
    }

    pub fn power_tier(&self) -> u8 {
        power_tier_for_kills(self.kills)
    }

    pub fn boss_count(&self) -> usize {
        self.enemies.iter().filter(|e| e.is_boss()).count()
    }

    pub fn normal_enemy_count(&self) -> usize {
        self.enemies.iter().filter(|e| e.is_normal()).count()
    }

    /// Show the highest newly reached difficulty alert, at most once per level
    pub fn evaluate_alerts(&mut self) {
        let level = alert_level_for_kills(self.kills);
        if level <= self.alert_level {
            return;
        }
        self.alert_level = level;
        if let Some(message) = alert_message(level) {
            log::info!("Difficulty alert {level} at {} kills", self.kills);
            self.alert = Some(Alert {
                message,
                timer: ALERT_DURATION,
            });
            self.events.push(GameEvent::StageAlert(level));
        }
    }

    /// Explosion ring centered on a destroyed enemy
    pub fn spawn_explosion(&mut self, center: Vec2, boss: bool) {
        let radius = if boss {
            BOSS_EXPLOSION_MAX_RADIUS
        } else {
            EXPLOSION_MAX_RADIUS
        };
        self.explosions.push(Explosion::new(center, radius));
    }

    /// Grant a life from a boss kill
    pub fn grant_extra_life(&mut self) {
        self.player.lives = self.player.lives.saturating_add(1);
        self.extra_life_timer = EXTRA_LIFE_DURATION;
    }

    /// Enter game over, committing the high score unless debug mode is on
    pub fn enter_game_over(&mut self) {
        self.mode = Mode::GameOver;
        log::info!("Game over: score {} ({} kills)", self.score, self.kills);
        if !self.debug.active && self.score > self.high_score {
            self.high_score = self.score;
            self.events.push(GameEvent::NewHighScore(self.score));
        }
        self.events.push(GameEvent::GameOver { score: self.score });
    }

    /// Tick down banner timers
    pub fn update_messages(&mut self, dt: f32) {
        tick_down(&mut self.extra_life_timer, dt);
        let expired = match &mut self.alert {
            Some(alert) => {
                tick_down(&mut alert.timer, dt);
                alert.timer == 0.0
            }
            None => false,
        };
        if expired {
            self.alert = None;
        }
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
