//! Collision detection and damage resolution
//!
//! Scans collect indices first and compact the collections once afterward,
//! so removal never invalidates an index mid-scan.

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;

use super::abilities::PowerUpKind;
use super::entities::PowerUp;
use super::progression::drop_chance_for_tier;
use super::spawn::try_spawn_boss;
use super::state::{GameEvent, GameState};
use crate::consts::{HIT_SHAKE, KILL_SHAKE};

/// An enemy destroyed this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kill {
    pub center: Vec2,
    pub boss: bool,
}

/// Remove entries whose index is flagged
fn compact<T>(items: &mut Vec<T>, remove: &[bool]) {
    let mut i = 0;
    items.retain(|_| {
        let keep = !remove[i];
        i += 1;
        keep
    });
}

/// Run every collision pass for one frame
pub fn resolve(state: &mut GameState) {
    let kills = resolve_player_bullets(state);
    apply_kills(state, &kills);
    resolve_player_damage(state);
    resolve_pickups(state);
}

/// Player bullets against enemies. Returns the kills, in enemy order.
pub fn resolve_player_bullets(state: &mut GameState) -> Vec<Kill> {
    if state.player.bullets.is_empty() || state.enemies.is_empty() {
        return Vec::new();
    }

    let bullets = &state.player.bullets;
    let mut consumed = vec![false; bullets.len()];
    let mut destroyed = vec![false; state.enemies.len()];
    let mut kills = Vec::new();

    for (ei, enemy) in state.enemies.iter_mut().enumerate() {
        let body = enemy.rect();
        for (bi, bullet) in bullets.iter().enumerate() {
            if consumed[bi] || !bullet.rect().intersects(&body) {
                continue;
            }
            consumed[bi] = true;
            if enemy.take_damage(bullet.damage) {
                destroyed[ei] = true;
                kills.push(Kill {
                    center: enemy.center(),
                    boss: enemy.is_boss(),
                });
            }
            break;
        }
    }

    compact(&mut state.player.bullets, &consumed);
    compact(&mut state.enemies, &destroyed);

    for kill in &kills {
        state.spawn_explosion(kill.center, kill.boss);
        state.shake.trigger(KILL_SHAKE);
    }
    kills
}

/// Score the kills, raise alerts, and roll drops
pub fn apply_kills(state: &mut GameState, kills: &[Kill]) {
    if kills.is_empty() {
        return;
    }
    let n = kills.len() as u32;
    state.score += n as u64;
    state.kills += n;
    state.evaluate_alerts();

    for kill in kills {
        if kill.boss {
            drop_power_up(state, kill.center, true);
            state.grant_extra_life();
            state.events.push(GameEvent::BossDefeated);
            log::info!("Boss defeated; lives now {}", state.player.lives);
        } else {
            drop_power_up(state, kill.center, false);
        }
    }

    // A kill may have crossed the boss threshold
    try_spawn_boss(state);
}

/// Maybe drop a power-up at `center`. `forced` skips the probability roll.
pub fn drop_power_up(state: &mut GameState, center: Vec2, forced: bool) -> bool {
    let tier = state.power_tier();
    if !forced && !state.rng.random_bool(drop_chance_for_tier(tier)) {
        return false;
    }
    let eligible = state.player.abilities.upgradable(tier);
    let pool: &[PowerUpKind] = if !eligible.is_empty() {
        &eligible
    } else if forced {
        &PowerUpKind::ALL
    } else {
        return false;
    };
    match pool.choose(&mut state.rng) {
        Some(&kind) => {
            state.power_ups.push(PowerUp::new(center, kind));
            true
        }
        None => false,
    }
}

/// Enemy bodies and enemy bullets against the player.
///
/// At most one life is lost per pass. Enemy bodies survive contact.
pub fn resolve_player_damage(state: &mut GameState) {
    if state.debug.active || state.player.is_invincible() {
        return;
    }
    let player = state.player.rect();
    if state.enemies.iter().any(|e| e.rect().intersects(&player)) {
        hit_player(state);
        return;
    }
    if let Some(i) = state
        .enemy_bullets
        .iter()
        .position(|b| b.rect().intersects(&player))
    {
        state.enemy_bullets.remove(i);
        hit_player(state);
    }
}

fn hit_player(state: &mut GameState) {
    let last_life = state.player.take_hit();
    state.shake.trigger(HIT_SHAKE);
    log::debug!("Player hit; {} lives left", state.player.lives);
    if last_life {
        state.enter_game_over();
    }
}

/// Player against falling power-ups
pub fn resolve_pickups(state: &mut GameState) {
    let player = state.player.rect();
    let tier = state.power_tier();
    let abilities = &mut state.player.abilities;
    state.power_ups.retain(|p| {
        if p.rect().intersects(&player) {
            abilities.apply_pickup(p.kind, tier);
            false
        } else {
            true
        }
    });
}
