//! Spawn director: wave composition and boss thresholds

use glam::Vec2;
use rand::Rng;

use super::enemy::{Enemy, Movement};
use super::progression::{
    boss_cap_for_stage, normal_enemy_cap, spawn_rate_for_kills, stage_for_kills,
    wave_tier_for_kills,
};
use super::state::{GameEvent, GameState};
use crate::consts::*;

/// Wave shapes the director can pick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wave {
    /// One shooter moving down
    DownShooter,
    /// One shooter crossing from a side
    HorizontalShooter,
    /// Three rushers across the top edge
    RusherLine,
    /// One rusher from a random top corner
    CornerRusher,
    /// Stage 3: a type-A elite, moving down or across
    Elite { horizontal: bool },
}

/// Pick a wave for the current kill count. `roll` and `sub_roll` are uniform in [0, 1).
pub fn choose_wave(kills: u32, roll: f32, sub_roll: f32) -> Wave {
    if stage_for_kills(kills) >= 3 {
        return Wave::Elite {
            horizontal: roll >= 0.5,
        };
    }
    match wave_tier_for_kills(kills) {
        0 => Wave::DownShooter,
        1 => {
            if roll < 0.7 {
                Wave::DownShooter
            } else {
                Wave::HorizontalShooter
            }
        }
        2 => {
            if roll >= 0.5 {
                Wave::RusherLine
            } else if sub_roll < 0.5 {
                Wave::DownShooter
            } else {
                Wave::HorizontalShooter
            }
        }
        _ => match roll {
            r if r < 0.35 => Wave::DownShooter,
            r if r < 0.70 => Wave::HorizontalShooter,
            r if r < 0.85 => Wave::RusherLine,
            _ => Wave::CornerRusher,
        },
    }
}

/// Whether another shooter fits under the concurrent cap
pub fn normal_cap_allows(state: &GameState) -> bool {
    normal_enemy_cap(state.kills).is_none_or(|cap| state.normal_enemy_count() < cap)
}

/// Entry point and movement for a shooter-like enemy of `size`
fn entry_point(rng: &mut impl Rng, horizontal: bool, size: f32) -> (Vec2, Movement) {
    if !horizontal {
        let x = rng.random::<f32>() * (CANVAS_WIDTH - size);
        return (Vec2::new(x, -size), Movement::Down);
    }
    let lane_bottom = CANVAS_HEIGHT * HORIZONTAL_LANE_FRACTION;
    let y = rng.random_range(HORIZONTAL_LANE_TOP..lane_bottom);
    if rng.random_bool(0.5) {
        (Vec2::new(CANVAS_WIDTH, y), Movement::Left)
    } else {
        (Vec2::new(-size, y), Movement::Right)
    }
}

/// Create the enemies for one wave
pub fn spawn_wave(state: &mut GameState, wave: Wave) {
    match wave {
        Wave::DownShooter | Wave::HorizontalShooter => {
            if !normal_cap_allows(state) {
                return;
            }
            let horizontal = wave == Wave::HorizontalShooter;
            let (pos, movement) = entry_point(&mut state.rng, horizontal, SHOOTER_SIZE);
            let enemy = Enemy::shooter(pos, movement, &mut state.rng);
            state.enemies.push(enemy);
        }
        Wave::Elite { horizontal } => {
            let (pos, movement) = entry_point(&mut state.rng, horizontal, ELITE_A_SIZE);
            state.enemies.push(Enemy::elite_type_a(pos, movement));
        }
        Wave::RusherLine => {
            for i in 0..3 {
                let x = CANVAS_WIDTH * (i + 1) as f32 / 4.0 - RUSHER_SIZE / 2.0;
                state
                    .enemies
                    .push(Enemy::rusher(Vec2::new(x, -RUSHER_SIZE), 0.0));
            }
        }
        Wave::CornerRusher => {
            let x = if state.rng.random_bool(0.5) {
                0.0
            } else {
                CANVAS_WIDTH - RUSHER_SIZE
            };
            state
                .enemies
                .push(Enemy::rusher(Vec2::new(x, -RUSHER_SIZE), 0.0));
        }
    }
    log::debug!("Spawned {wave:?} at {} kills", state.kills);
}

/// Spawn a boss if the kill threshold is reached and the stage cap allows.
/// Returns true if one was spawned.
pub fn try_spawn_boss(state: &mut GameState) -> bool {
    if state.kills < state.next_elite_at {
        return false;
    }
    if let Some(cap) = boss_cap_for_stage(state.stage()) {
        if state.boss_count() >= cap {
            return false;
        }
    }

    let power_sum = state.player.abilities.power_sum();
    let x = state.rng.random::<f32>() * (CANVAS_WIDTH - BOSS_SIZE);
    let y = state.rng.random_range(10.0..60.0);
    let boss = Enemy::elite_shooter(Vec2::new(x, y), power_sum, &mut state.rng);
    log::info!(
        "Boss spawned at {} kills with {} hp (next at {})",
        state.kills,
        boss.hp,
        state.next_elite_at + BOSS_THRESHOLD_STEP
    );
    state.enemies.push(boss);
    state.next_elite_at += BOSS_THRESHOLD_STEP;
    state.events.push(GameEvent::BossSpawned);
    true
}

/// Per-frame director: count down to the next wave, then check the boss threshold
pub fn update_spawner(state: &mut GameState, dt: f32) {
    state.spawn_cooldown -= dt;
    if state.spawn_cooldown <= 0.0 {
        let roll = state.rng.random::<f32>();
        let sub_roll = state.rng.random::<f32>();
        let wave = choose_wave(state.kills, roll, sub_roll);
        spawn_wave(state, wave);
        state.spawn_cooldown = spawn_rate_for_kills(state.kills);
    }
    try_spawn_boss(state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::enemy::EnemyKind;

    fn playing_state(kills: u32) -> GameState {
        let mut state = GameState::new(11, 0, 0);
        state.start_run();
        state.kills = kills;
        state
    }

    #[test]
    fn test_wave_choice_by_tier() {
        assert_eq!(choose_wave(0, 0.99, 0.99), Wave::DownShooter);
        assert_eq!(choose_wave(15, 0.69, 0.0), Wave::DownShooter);
        assert_eq!(choose_wave(15, 0.70, 0.0), Wave::HorizontalShooter);
        assert_eq!(choose_wave(30, 0.2, 0.7), Wave::HorizontalShooter);
        assert_eq!(choose_wave(30, 0.6, 0.0), Wave::RusherLine);
        assert_eq!(choose_wave(60, 0.3, 0.0), Wave::DownShooter);
        assert_eq!(choose_wave(60, 0.5, 0.0), Wave::HorizontalShooter);
        assert_eq!(choose_wave(60, 0.8, 0.0), Wave::RusherLine);
        assert_eq!(choose_wave(60, 0.9, 0.0), Wave::CornerRusher);
    }

    #[test]
    fn test_stage_three_overrides_tiers() {
        assert_eq!(choose_wave(300, 0.1, 0.0), Wave::Elite { horizontal: false });
        assert_eq!(choose_wave(300, 0.9, 0.0), Wave::Elite { horizontal: true });
    }

    #[test]
    fn test_normal_cap_gates_shooters() {
        let mut state = playing_state(0);
        for _ in 0..5 {
            spawn_wave(&mut state, Wave::DownShooter);
        }
        assert_eq!(state.normal_enemy_count(), 2);

        // Rushers and elites are exempt
        spawn_wave(&mut state, Wave::RusherLine);
        spawn_wave(&mut state, Wave::Elite { horizontal: true });
        assert_eq!(state.enemies.len(), 6);

        state.kills = 5;
        for _ in 0..5 {
            spawn_wave(&mut state, Wave::HorizontalShooter);
        }
        assert_eq!(state.normal_enemy_count(), 5);

        state.kills = 10;
        spawn_wave(&mut state, Wave::DownShooter);
        assert_eq!(state.normal_enemy_count(), 6);
    }

    #[test]
    fn test_horizontal_entry_lanes() {
        let mut state = playing_state(20);
        for _ in 0..20 {
            spawn_wave(&mut state, Wave::HorizontalShooter);
        }
        for e in &state.enemies {
            let EnemyKind::Shooter { movement, .. } = e.kind else {
                panic!("expected shooter");
            };
            assert_ne!(movement, Movement::Down);
            assert!(e.pos.y >= HORIZONTAL_LANE_TOP);
            assert!(!e.is_offscreen());
        }
    }

    #[test]
    fn test_rusher_line() {
        let mut state = playing_state(30);
        spawn_wave(&mut state, Wave::RusherLine);
        assert_eq!(state.enemies.len(), 3);
        assert!(state.enemies.iter().all(|e| e.pos.y < 0.0));
    }

    #[test]
    fn test_corner_rusher_enters_at_a_top_corner() {
        let mut state = playing_state(60);
        for _ in 0..16 {
            spawn_wave(&mut state, Wave::CornerRusher);
        }
        assert_eq!(state.enemies.len(), 16);
        for e in &state.enemies {
            assert!(matches!(e.kind, EnemyKind::Rusher { stun } if stun == 0.0));
            assert!(e.pos.x == 0.0 || e.pos.x == CANVAS_WIDTH - RUSHER_SIZE);
            assert_eq!(e.pos.y, -RUSHER_SIZE);
        }
    }

    #[test]
    fn test_boss_threshold_advances() {
        let mut state = playing_state(29);
        assert!(!try_spawn_boss(&mut state));
        state.kills = 30;
        assert!(try_spawn_boss(&mut state));
        assert_eq!(state.next_elite_at, 60);
        assert_eq!(state.boss_count(), 1);
    }

    #[test]
    fn test_boss_cap_by_stage() {
        let mut state = playing_state(90);
        assert!(try_spawn_boss(&mut state));
        // Stage 0 allows one boss at a time
        assert!(!try_spawn_boss(&mut state));
        assert_eq!(state.next_elite_at, 60);

        state.kills = 250;
        assert!(try_spawn_boss(&mut state));
        assert!(try_spawn_boss(&mut state));
        assert!(!try_spawn_boss(&mut state));
        assert_eq!(state.boss_count(), 3);

        state.kills = 400;
        assert!(try_spawn_boss(&mut state));
        assert_eq!(state.boss_count(), 4);
    }

    #[test]
    fn test_spawner_interval() {
        let mut state = playing_state(0);
        update_spawner(&mut state, 0.016);
        assert_eq!(state.enemies.len(), 1);
        assert!((state.spawn_cooldown - 1.0).abs() < 1e-6);

        state.kills = 100;
        state.spawn_cooldown = 0.0;
        update_spawner(&mut state, 0.016);
        assert!((state.spawn_cooldown - 0.7).abs() < 1e-6);
    }
}
