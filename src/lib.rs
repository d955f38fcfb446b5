//! Shoot 'Em Up - A vertical arcade shooter
//!
//! Core modules:
//! - `sim`: Simulation (entities, spawning, collisions, game state machine)
//! - `renderer`: Drawing-surface abstraction and read-only scene drawing
//! - `platform`: Input edge detection and frame timing
//! - `persistence`: High score storage backends
//! - `game`: Session driver tying one update and one render to each frame

pub mod error;
pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::StorageError;
pub use game::Game;
pub use highscores::HighScore;
pub use settings::{QualityPreset, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Canvas dimensions (pixels)
    pub const CANVAS_WIDTH: f32 = 480.0;
    pub const CANVAS_HEIGHT: f32 = 640.0;

    /// Largest frame delta fed to the simulation (seconds)
    pub const MAX_FRAME_DT: f32 = 0.05;

    /// Player ship
    pub const PLAYER_SIZE: f32 = 40.0;
    pub const PLAYER_SPEED: f32 = 250.0;
    pub const PLAYER_FOLLOW_SPEED: f32 = 8.0;
    pub const PLAYER_KEY_NUDGE: f32 = 0.3;
    pub const PLAYER_FIRE_RATE: f32 = 0.2;
    pub const PLAYER_START_LIVES: u32 = 5;
    pub const PLAYER_INVINCIBLE_DURATION: f32 = 1.0;
    /// Gap between the ship's bottom edge and the canvas bottom at spawn
    pub const PLAYER_BOTTOM_MARGIN: f32 = 20.0;

    /// Player bullets
    pub const BULLET_RADIUS: f32 = 4.0;
    pub const BULLET_BASE_SPEED: f32 = 450.0;
    pub const BULLET_SPEED_PER_LEVEL: f32 = 100.0;
    pub const BULLET_BASE_DAMAGE: u32 = 50;
    pub const BULLET_DAMAGE_PER_LEVEL: u32 = 50;
    /// Half-angle of the spread fan (degrees)
    pub const SPREAD_HALF_ANGLE_DEG: f32 = 28.0;

    /// Enemy bullets
    pub const ENEMY_BULLET_RADIUS: f32 = 4.0;
    pub const ENEMY_BULLET_SPEED: f32 = 200.0;
    pub const ENEMY_FIRE_MIN: f32 = 1.0;
    pub const ENEMY_FIRE_MAX: f32 = 2.0;
    /// Shooters hold fire when closer than this to the player
    pub const ENEMY_FIRE_MIN_DISTANCE: f32 = 30.0;
    pub const ENEMY_FIRE_RETRY: f32 = 0.15;
    pub const ENEMY_MUZZLE_GAP: f32 = 6.0;

    /// Shooter
    pub const SHOOTER_SIZE: f32 = 30.0;
    pub const SHOOTER_HP: u32 = 50;
    pub const SHOOTER_SPEED: f32 = 120.0;

    /// Elite type A (stage 3 shooter replacement)
    pub const ELITE_A_SIZE: f32 = 60.0;
    pub const ELITE_A_HP: u32 = SHOOTER_HP;
    pub const ELITE_A_SPEED: f32 = 60.0;

    /// Rusher
    pub const RUSHER_SIZE: f32 = 26.0;
    pub const RUSHER_HP: u32 = 50;
    pub const RUSHER_SPEED: f32 = 160.0;
    pub const RUSHER_SPAWN_STUN: f32 = 0.6;

    /// Elite shooter (boss)
    pub const BOSS_SIZE: f32 = 70.0;
    pub const BOSS_HP_PER_POWER: u32 = 500;
    pub const BOSS_SPEED: f32 = 80.0;
    pub const BOSS_RETARGET_MIN: f32 = 2.0;
    pub const BOSS_RETARGET_MAX: f32 = 3.5;
    pub const BOSS_FIRST_THRESHOLD: u32 = 30;
    pub const BOSS_THRESHOLD_STEP: u32 = 30;

    /// Horizontal movers enter between these heights
    pub const HORIZONTAL_LANE_TOP: f32 = 40.0;
    pub const HORIZONTAL_LANE_FRACTION: f32 = 0.4;

    /// Chain/spawn cycle shared by elites
    pub const CHAIN_SHOTS: u8 = 10;
    pub const CHAIN_SHOT_SPACING: f32 = 0.08;
    pub const CHAIN_COOLDOWN: f32 = 3.0;
    pub const CHAIN_BURSTS: u8 = 2;
    pub const SPAWN_WAVES: u8 = 2;
    pub const SPAWN_WAVE_SPACING: f32 = 1.0;
    pub const CYCLE_WARMUP: f32 = 1.0;

    /// Power-ups
    pub const POWERUP_SIZE: f32 = 20.0;
    pub const POWERUP_FALL_SPEED: f32 = 80.0;
    pub const MAX_ABILITY_LEVEL: u8 = 3;

    /// Effects
    pub const EXPLOSION_MAX_RADIUS: f32 = 18.0;
    pub const BOSS_EXPLOSION_MAX_RADIUS: f32 = 40.0;
    pub const EXPLOSION_GROW: f32 = 140.0;
    pub const EXPLOSION_FADE: f32 = 3.2;
    pub const KILL_SHAKE: (f32, f32) = (0.15, 4.0);
    pub const HIT_SHAKE: (f32, f32) = (0.25, 6.0);

    /// Star field
    pub const STAR_MIN_SPEED: f32 = 40.0;
    pub const STAR_SPEED_RANGE: f32 = 80.0;
    pub const STAR_MIN_SIZE: f32 = 1.0;
    pub const STAR_SIZE_RANGE: f32 = 2.0;

    /// On-screen messages (seconds)
    pub const ALERT_DURATION: f32 = 2.5;
    pub const EXTRA_LIFE_DURATION: f32 = 2.0;
}

/// Unit vector pointing from `from` toward `to`, or `fallback` when they coincide
#[inline]
pub fn direction_to(from: Vec2, to: Vec2, fallback: Vec2) -> Vec2 {
    let delta = to - from;
    let len = delta.length();
    if len > f32::EPSILON {
        delta / len
    } else {
        fallback
    }
}

/// Decrement a countdown timer, flooring at zero
#[inline]
pub fn tick_down(timer: &mut f32, dt: f32) {
    *timer = (*timer - dt).max(0.0);
}
