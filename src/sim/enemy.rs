//! Enemy kinds and their per-frame behavior
//!
//! All four kinds share one struct for body, hp and kinematics. Behavior
//! lives in the `EnemyKind` variant and is dispatched with `match`.

use glam::Vec2;
use rand::Rng;

use super::elite::{EliteActions, EliteCycle};
use super::entities::EnemyBullet;
use super::geometry::Rect;
use crate::consts::*;

/// Travel direction for shooters and type-A elites
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    Down,
    /// Enters from the right edge, travels left
    Left,
    /// Enters from the left edge, travels right
    Right,
}

impl Movement {
    fn velocity(&self) -> Vec2 {
        match self {
            Movement::Down => Vec2::Y,
            Movement::Left => Vec2::NEG_X,
            Movement::Right => Vec2::X,
        }
    }
}

/// Behavior variant
#[derive(Debug, Clone, PartialEq)]
pub enum EnemyKind {
    /// Basic enemy; fires at the player on a random interval
    Shooter { movement: Movement, fire_cooldown: f32 },
    /// Stage-3 shooter replacement with the chain/spawn cycle
    EliteTypeA { movement: Movement, cycle: EliteCycle },
    /// Homes in on the player after an optional stun
    Rusher { stun: f32 },
    /// Boss: wanders the upper field and runs the chain/spawn cycle
    EliteShooter {
        target: Vec2,
        retarget_timer: f32,
        cycle: EliteCycle,
    },
}

/// World access an enemy needs while updating
pub struct EnemyContext<'a, R: Rng> {
    pub player_center: Vec2,
    pub bullets: &'a mut Vec<EnemyBullet>,
    /// Rushers spawned this frame; merged into the world after the update pass
    pub spawned: &'a mut Vec<Enemy>,
    pub rng: &'a mut R,
}

impl<R: Rng> EliteActions for EnemyContext<'_, R> {
    fn fire_at_player(&mut self, origin: Vec2, muzzle_gap: f32) {
        self.bullets
            .push(EnemyBullet::aimed(origin, self.player_center, muzzle_gap));
    }

    fn spawn_rusher(&mut self, pos: Vec2) {
        self.spawned.push(Enemy::rusher(pos, RUSHER_SPAWN_STUN));
    }
}

/// An enemy on the field
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub hp: u32,
    pub max_hp: u32,
    pub speed: f32,
    pub kind: EnemyKind,
}

fn random_fire_delay(rng: &mut impl Rng) -> f32 {
    ENEMY_FIRE_MIN + rng.random::<f32>() * (ENEMY_FIRE_MAX - ENEMY_FIRE_MIN)
}

/// Random wander point inside the upper part of the field
fn random_wander_target(rng: &mut impl Rng, size: f32) -> Vec2 {
    Vec2::new(
        rng.random::<f32>() * (CANVAS_WIDTH - size),
        rng.random::<f32>() * (CANVAS_HEIGHT * HORIZONTAL_LANE_FRACTION - size).max(0.0),
    )
}

impl Enemy {
    fn new(pos: Vec2, size: f32, hp: u32, speed: f32, kind: EnemyKind) -> Self {
        Self {
            pos,
            size: Vec2::splat(size),
            hp,
            max_hp: hp,
            speed,
            kind,
        }
    }

    pub fn shooter(pos: Vec2, movement: Movement, rng: &mut impl Rng) -> Self {
        let fire_cooldown = random_fire_delay(rng);
        Self::new(
            pos,
            SHOOTER_SIZE,
            SHOOTER_HP,
            SHOOTER_SPEED,
            EnemyKind::Shooter {
                movement,
                fire_cooldown,
            },
        )
    }

    pub fn elite_type_a(pos: Vec2, movement: Movement) -> Self {
        Self::new(
            pos,
            ELITE_A_SIZE,
            ELITE_A_HP,
            ELITE_A_SPEED,
            EnemyKind::EliteTypeA {
                movement,
                cycle: EliteCycle::default(),
            },
        )
    }

    pub fn rusher(pos: Vec2, stun: f32) -> Self {
        Self::new(pos, RUSHER_SIZE, RUSHER_HP, RUSHER_SPEED, EnemyKind::Rusher { stun })
    }

    /// Boss with hp scaled by the player's total ability levels
    pub fn elite_shooter(pos: Vec2, power_sum: u32, rng: &mut impl Rng) -> Self {
        let hp = BOSS_HP_PER_POWER.saturating_mul(power_sum);
        let retarget_timer = rng.random_range(BOSS_RETARGET_MIN..BOSS_RETARGET_MAX);
        Self::new(
            pos,
            BOSS_SIZE,
            hp,
            BOSS_SPEED,
            EnemyKind::EliteShooter {
                target: random_wander_target(rng, BOSS_SIZE),
                retarget_timer,
                cycle: EliteCycle::default(),
            },
        )
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    pub fn is_boss(&self) -> bool {
        matches!(self.kind, EnemyKind::EliteShooter { .. })
    }

    /// Counts toward the concurrent shooter cap
    pub fn is_normal(&self) -> bool {
        matches!(self.kind, EnemyKind::Shooter { .. })
    }

    pub fn is_dead(&self) -> bool {
        self.hp == 0
    }

    /// Apply damage, flooring hp at zero. Returns true if this killed the enemy.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        self.hp = self.hp.saturating_sub(amount);
        self.is_dead()
    }

    /// Left the playable area. Rushers and bosses never do.
    pub fn is_offscreen(&self) -> bool {
        let movement = match &self.kind {
            EnemyKind::Shooter { movement, .. } | EnemyKind::EliteTypeA { movement, .. } => {
                *movement
            }
            EnemyKind::Rusher { .. } | EnemyKind::EliteShooter { .. } => return false,
        };
        let below = self.pos.y > CANVAS_HEIGHT;
        match movement {
            Movement::Down => below,
            Movement::Left => below || self.pos.x + self.size.x < 0.0,
            Movement::Right => below || self.pos.x > CANVAS_WIDTH,
        }
    }

    /// Move and act for one frame
    pub fn update<R: Rng>(&mut self, dt: f32, ctx: &mut EnemyContext<'_, R>) {
        let center = self.center();
        match &mut self.kind {
            EnemyKind::Shooter {
                movement,
                fire_cooldown,
            } => {
                self.pos += movement.velocity() * self.speed * dt;
                *fire_cooldown -= dt;
                if *fire_cooldown <= 0.0 {
                    let center = self.pos + self.size / 2.0;
                    let distance = (ctx.player_center - center).length();
                    if distance < ENEMY_FIRE_MIN_DISTANCE {
                        *fire_cooldown = ENEMY_FIRE_RETRY;
                    } else {
                        ctx.fire_at_player(center, self.size.y / 2.0 + ENEMY_MUZZLE_GAP);
                        *fire_cooldown = random_fire_delay(&mut *ctx.rng);
                    }
                }
            }
            EnemyKind::EliteTypeA { movement, cycle } => {
                self.pos += movement.velocity() * self.speed * dt;
                cycle.update(dt, self.pos, self.size, ctx);
            }
            EnemyKind::Rusher { stun } => {
                if *stun > 0.0 {
                    *stun = (*stun - dt).max(0.0);
                } else {
                    let dir = crate::direction_to(center, ctx.player_center, Vec2::ZERO);
                    self.pos += dir * self.speed * dt;
                }
            }
            EnemyKind::EliteShooter {
                target,
                retarget_timer,
                cycle,
            } => {
                *retarget_timer -= dt;
                if *retarget_timer <= 0.0 {
                    *target = random_wander_target(&mut *ctx.rng, self.size.x);
                    *retarget_timer = ctx.rng.random_range(BOSS_RETARGET_MIN..BOSS_RETARGET_MAX);
                }
                let to_target = *target - self.pos;
                let step = self.speed * dt;
                if to_target.length() <= step {
                    self.pos = *target;
                } else {
                    self.pos += to_target.normalize() * step;
                }
                cycle.update(dt, self.pos, self.size, ctx);
            }
        }
    }

    /// Sprite name and fallback color
    pub fn sprite(&self) -> (&'static str, &'static str) {
        match self.kind {
            EnemyKind::Shooter { .. } => ("enemy", "#f33"),
            EnemyKind::EliteTypeA { .. } => ("elite", "#c3f"),
            EnemyKind::Rusher { .. } => ("rusher", "#f93"),
            EnemyKind::EliteShooter { .. } => ("elite", "#f0c"),
        }
    }
}
