//! Chain/spawn cycle shared by both elite kinds
//!
//! Chain: two bursts of aimed shots, each followed by a cooldown.
//! Spawn: two waves of rushers one second apart. Then back to chain.

use glam::Vec2;

use crate::consts::*;

/// What an elite can do while cycling
pub trait EliteActions {
    /// Fire one aimed shot from `origin`
    fn fire_at_player(&mut self, origin: Vec2, muzzle_gap: f32);
    /// Spawn a stunned rusher with its top-left corner at `pos`
    fn spawn_rusher(&mut self, pos: Vec2);
}

/// Sub-state of the cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CyclePhase {
    /// Firing a burst; `timer` counts down to the next shot
    Burst { round: u8, shots_left: u8, timer: f32 },
    /// Resting after burst `round`
    Cooldown { round: u8, timer: f32 },
    /// Spawning rushers; `timer` counts down to the next wave
    Spawn { waves_left: u8, timer: f32 },
}

/// Chain/spawn cycle state
#[derive(Debug, Clone, PartialEq)]
pub struct EliteCycle {
    pub phase: CyclePhase,
}

impl Default for EliteCycle {
    fn default() -> Self {
        Self {
            phase: Self::chain_start(CYCLE_WARMUP),
        }
    }
}

impl EliteCycle {
    fn chain_start(delay: f32) -> CyclePhase {
        CyclePhase::Burst {
            round: 0,
            shots_left: CHAIN_SHOTS,
            timer: delay,
        }
    }

    /// Advance the cycle. `pos` and `size` describe the elite's body.
    pub fn update(&mut self, dt: f32, pos: Vec2, size: Vec2, actions: &mut impl EliteActions) {
        let center = pos + size / 2.0;
        let next = match &mut self.phase {
            CyclePhase::Burst {
                round,
                shots_left,
                timer,
            } => {
                *timer -= dt;
                while *timer <= 0.0 && *shots_left > 0 {
                    actions.fire_at_player(center, size.y / 2.0 + ENEMY_MUZZLE_GAP);
                    *shots_left -= 1;
                    *timer += CHAIN_SHOT_SPACING;
                }
                (*shots_left == 0).then_some(CyclePhase::Cooldown {
                    round: *round,
                    timer: CHAIN_COOLDOWN,
                })
            }
            CyclePhase::Cooldown { round, timer } => {
                *timer -= dt;
                if *timer > 0.0 {
                    None
                } else if *round + 1 < CHAIN_BURSTS {
                    Some(CyclePhase::Burst {
                        round: *round + 1,
                        shots_left: CHAIN_SHOTS,
                        timer: 0.0,
                    })
                } else {
                    Some(CyclePhase::Spawn {
                        waves_left: SPAWN_WAVES,
                        timer: 0.0,
                    })
                }
            }
            CyclePhase::Spawn { waves_left, timer } => {
                *timer -= dt;
                if *timer > 0.0 {
                    None
                } else {
                    let y = center.y - RUSHER_SIZE / 2.0;
                    actions.spawn_rusher(Vec2::new(pos.x - RUSHER_SIZE, y));
                    actions.spawn_rusher(Vec2::new(pos.x + size.x, y));
                    *waves_left = waves_left.saturating_sub(1);
                    *timer = SPAWN_WAVE_SPACING;
                    (*waves_left == 0).then(|| Self::chain_start(SPAWN_WAVE_SPACING))
                }
            }
        };
        if let Some(phase) = next {
            self.phase = phase;
        }
    }
}
