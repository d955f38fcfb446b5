//! Player ability levels and the fire pattern they produce

use glam::Vec2;

use super::progression::max_level_for_tier;
use crate::consts::*;

/// Power-up categories, one per ability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerUpKind {
    Spread,
    Damage,
    Speed,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [PowerUpKind::Spread, PowerUpKind::Damage, PowerUpKind::Speed];

    /// Single-letter label drawn on the pickup
    pub fn label(&self) -> &'static str {
        match self {
            PowerUpKind::Spread => "S",
            PowerUpKind::Damage => "D",
            PowerUpKind::Speed => "V",
        }
    }
}

/// Independent ability levels (0-3 each)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Abilities {
    pub spread: u8,
    pub damage: u8,
    pub speed: u8,
}

/// One bullet of a volley
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotSpec {
    pub dir: Vec2,
    pub speed: f32,
    pub damage: u32,
}

impl Abilities {
    pub fn level(&self, kind: PowerUpKind) -> u8 {
        match kind {
            PowerUpKind::Spread => self.spread,
            PowerUpKind::Damage => self.damage,
            PowerUpKind::Speed => self.speed,
        }
    }

    fn level_mut(&mut self, kind: PowerUpKind) -> &mut u8 {
        match kind {
            PowerUpKind::Spread => &mut self.spread,
            PowerUpKind::Damage => &mut self.damage,
            PowerUpKind::Speed => &mut self.speed,
        }
    }

    /// Sum of all levels (boss hp scales with this)
    pub fn power_sum(&self) -> u32 {
        self.spread as u32 + self.damage as u32 + self.speed as u32
    }

    /// Raise an ability by one, up to the cap for `power_tier`.
    ///
    /// Levels already above the cap are left alone. Returns true if the
    /// level changed.
    pub fn apply_pickup(&mut self, kind: PowerUpKind, power_tier: u8) -> bool {
        let cap = max_level_for_tier(power_tier);
        let level = self.level_mut(kind);
        if *level < cap {
            *level += 1;
            true
        } else {
            false
        }
    }

    /// Categories still below the cap for `power_tier`
    pub fn upgradable(&self, power_tier: u8) -> Vec<PowerUpKind> {
        let cap = max_level_for_tier(power_tier);
        PowerUpKind::ALL
            .into_iter()
            .filter(|&k| self.level(k) < cap)
            .collect()
    }

    pub fn bullet_count(&self) -> usize {
        1 + self.spread as usize * 2
    }

    pub fn bullet_speed(&self) -> f32 {
        BULLET_BASE_SPEED + self.speed as f32 * BULLET_SPEED_PER_LEVEL
    }

    pub fn bullet_damage(&self) -> u32 {
        BULLET_BASE_DAMAGE + self.damage as u32 * BULLET_DAMAGE_PER_LEVEL
    }

    /// Directions and stats for one volley, fanned symmetrically around straight up
    pub fn volley(&self) -> Vec<ShotSpec> {
        let count = self.bullet_count();
        let speed = self.bullet_speed();
        let damage = self.bullet_damage();

        if count == 1 {
            return vec![ShotSpec { dir: Vec2::NEG_Y, speed, damage }];
        }

        let half = SPREAD_HALF_ANGLE_DEG.to_radians();
        let step = 2.0 * half / (count - 1) as f32;
        (0..count)
            .map(|i| {
                let angle = -half + step * i as f32;
                ShotSpec {
                    dir: Vec2::new(angle.sin(), -angle.cos()),
                    speed,
                    damage,
                }
            })
            .collect()
    }
}
