//! Player, projectiles, pickups and ambient effects

use glam::Vec2;
use rand::Rng;

use super::abilities::{Abilities, PowerUpKind};
use super::geometry::Rect;
use super::tick::FrameInput;
use crate::consts::*;
use crate::tick_down;

/// Keys that nudge the ship (any of each group)
const LEFT_KEYS: [&str; 2] = ["arrowleft", "a"];
const RIGHT_KEYS: [&str; 2] = ["arrowright", "d"];
const UP_KEYS: [&str; 2] = ["arrowup", "w"];
const DOWN_KEYS: [&str; 2] = ["arrowdown", "s"];
const FIRE_KEYS: [&str; 3] = [" ", "space", "spacebar"];

/// The player's ship
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub color: &'static str,
    pub bullets: Vec<Bullet>,
    pub shoot_cooldown: f32,
    pub fire_rate: f32,
    pub lives: u32,
    pub invincible_timer: f32,
    pub invincible_duration: f32,
    pub abilities: Abilities,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Self::spawn_pos(),
            size: Vec2::splat(PLAYER_SIZE),
            speed: PLAYER_SPEED,
            color: "#39f",
            bullets: Vec::new(),
            shoot_cooldown: 0.0,
            fire_rate: PLAYER_FIRE_RATE,
            lives: PLAYER_START_LIVES,
            invincible_timer: 0.0,
            invincible_duration: PLAYER_INVINCIBLE_DURATION,
            abilities: Abilities::default(),
        }
    }
}

impl Player {
    /// Bottom-center spawn point
    pub fn spawn_pos() -> Vec2 {
        Vec2::new(
            CANVAS_WIDTH / 2.0 - PLAYER_SIZE / 2.0,
            CANVAS_HEIGHT - PLAYER_SIZE - PLAYER_BOTTOM_MARGIN,
        )
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible_timer > 0.0
    }

    /// Lose one life and start the invincibility window. Returns true on the last life.
    pub fn take_hit(&mut self) -> bool {
        self.lives = self.lives.saturating_sub(1);
        self.invincible_timer = self.invincible_duration;
        self.lives == 0
    }

    /// Advance timers, follow the pointer, and fire if the trigger is held.
    ///
    /// The ship is stunned (no movement, no firing) while invincible.
    pub fn update(&mut self, dt: f32, input: &FrameInput) {
        tick_down(&mut self.invincible_timer, dt);
        if self.is_invincible() {
            return;
        }

        // Smoothed pointer follow
        let max = Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT) - self.size;
        let target = (input.pointer - self.size / 2.0).clamp(Vec2::ZERO, max);
        let t = (PLAYER_FOLLOW_SPEED * dt).min(1.0);
        self.pos += (target - self.pos) * t;

        // Keyboard nudge
        let mut dir = Vec2::ZERO;
        if input.any_held(&LEFT_KEYS) {
            dir.x -= 1.0;
        }
        if input.any_held(&RIGHT_KEYS) {
            dir.x += 1.0;
        }
        if input.any_held(&UP_KEYS) {
            dir.y -= 1.0;
        }
        if input.any_held(&DOWN_KEYS) {
            dir.y += 1.0;
        }
        self.pos += dir * self.speed * dt * PLAYER_KEY_NUDGE;
        self.pos = self.pos.clamp(Vec2::ZERO, max);

        tick_down(&mut self.shoot_cooldown, dt);
        let trigger = input.any_held(&FIRE_KEYS) || input.left_down;
        if trigger && self.shoot_cooldown == 0.0 {
            self.fire();
        }
    }

    /// Spawn one volley from the nose of the ship
    pub fn fire(&mut self) {
        let origin = Vec2::new(self.pos.x + self.size.x / 2.0, self.pos.y);
        for shot in self.abilities.volley() {
            self.bullets.push(Bullet::new(origin, shot.dir, shot.speed, shot.damage));
        }
        self.shoot_cooldown = self.fire_rate;
    }
}

/// Player-owned projectile
#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    pub pos: Vec2,
    /// Unit direction
    pub dir: Vec2,
    pub speed: f32,
    pub radius: f32,
    pub damage: u32,
}

impl Bullet {
    pub fn new(pos: Vec2, dir: Vec2, speed: f32, damage: u32) -> Self {
        Self {
            pos,
            dir,
            speed,
            radius: BULLET_RADIUS,
            damage,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.pos += self.dir * self.speed * dt;
    }

    pub fn rect(&self) -> Rect {
        Rect::around_circle(self.pos, self.radius)
    }

    pub fn is_offscreen(&self) -> bool {
        circle_offscreen(self.pos, self.radius)
    }
}

/// Enemy-owned projectile, aimed at the player when fired
#[derive(Debug, Clone, PartialEq)]
pub struct EnemyBullet {
    pub pos: Vec2,
    pub dir: Vec2,
    pub speed: f32,
    pub radius: f32,
}

impl EnemyBullet {
    pub fn new(pos: Vec2, dir: Vec2) -> Self {
        Self {
            pos,
            dir,
            speed: ENEMY_BULLET_SPEED,
            radius: ENEMY_BULLET_RADIUS,
        }
    }

    /// Bullet fired from `origin` toward `target`, spawned `gap` px along the aim
    pub fn aimed(origin: Vec2, target: Vec2, gap: f32) -> Self {
        let dir = crate::direction_to(origin, target, Vec2::Y);
        Self::new(origin + dir * gap, dir)
    }

    pub fn update(&mut self, dt: f32) {
        self.pos += self.dir * self.speed * dt;
    }

    pub fn rect(&self) -> Rect {
        Rect::around_circle(self.pos, self.radius)
    }

    pub fn is_offscreen(&self) -> bool {
        circle_offscreen(self.pos, self.radius)
    }
}

fn circle_offscreen(pos: Vec2, r: f32) -> bool {
    pos.x + r < 0.0 || pos.y + r < 0.0 || pos.x - r > CANVAS_WIDTH || pos.y - r > CANVAS_HEIGHT
}

/// Falling ability pickup
#[derive(Debug, Clone, PartialEq)]
pub struct PowerUp {
    pub pos: Vec2,
    pub size: f32,
    pub kind: PowerUpKind,
}

impl PowerUp {
    /// Pickup centered on `center`
    pub fn new(center: Vec2, kind: PowerUpKind) -> Self {
        Self {
            pos: center - Vec2::splat(POWERUP_SIZE / 2.0),
            size: POWERUP_SIZE,
            kind,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.pos.y += POWERUP_FALL_SPEED * dt;
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.rect().center()
    }

    pub fn is_offscreen(&self) -> bool {
        self.pos.y > CANVAS_HEIGHT
    }
}

/// Expanding, fading ring left behind by a kill
#[derive(Debug, Clone, PartialEq)]
pub struct Explosion {
    pub pos: Vec2,
    pub radius: f32,
    pub max_radius: f32,
    pub alpha: f32,
    pub color: &'static str,
}

impl Explosion {
    pub fn new(pos: Vec2, max_radius: f32) -> Self {
        Self {
            pos,
            radius: 0.0,
            max_radius,
            alpha: 1.0,
            color: "#fff",
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.radius = (self.radius + EXPLOSION_GROW * dt).min(self.max_radius);
        self.alpha = (self.alpha - EXPLOSION_FADE * dt).max(0.0);
    }

    pub fn is_done(&self) -> bool {
        self.alpha <= 0.0
    }
}

const STAR_PALETTE: [&str; 3] = ["#555", "#888", "#aaa"];

/// Background star; wraps to the top instead of leaving the field
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub pos: Vec2,
    pub size: f32,
    pub speed: f32,
    pub color: &'static str,
}

impl Star {
    pub fn random(rng: &mut impl Rng) -> Self {
        Self {
            pos: Vec2::new(
                rng.random::<f32>() * CANVAS_WIDTH,
                rng.random::<f32>() * CANVAS_HEIGHT,
            ),
            size: STAR_MIN_SIZE + rng.random::<f32>() * STAR_SIZE_RANGE,
            speed: STAR_MIN_SPEED + rng.random::<f32>() * STAR_SPEED_RANGE,
            color: STAR_PALETTE[rng.random_range(0..STAR_PALETTE.len())],
        }
    }

    pub fn update(&mut self, dt: f32, rng: &mut impl Rng) {
        self.pos.y += self.speed * dt;
        if self.pos.y > CANVAS_HEIGHT + self.size {
            self.pos.y = -self.size;
            self.pos.x = rng.random::<f32>() * CANVAS_WIDTH;
            self.speed = STAR_MIN_SPEED + rng.random::<f32>() * STAR_SPEED_RANGE;
            self.size = STAR_MIN_SIZE + rng.random::<f32>() * STAR_SIZE_RANGE;
        }
    }
}

/// Fresh star field
pub fn star_field(count: usize, rng: &mut impl Rng) -> Vec<Star> {
    (0..count).map(|_| Star::random(rng)).collect()
}
