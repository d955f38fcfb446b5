//! Difficulty progression driven by the kill counter
//!
//! Pure functions only. Everything here is recomputed from `kills` every
//! frame; nothing is cached in the game state.

/// Kills per stage step
pub const KILLS_PER_STAGE: u32 = 100;
/// Highest stage / tier
pub const MAX_STAGE: u8 = 3;

/// Wave tier thresholds (kills needed for tier 1, 2, 3)
pub const WAVE_TIER_THRESHOLDS: [u32; 3] = [15, 30, 50];
/// Power tier thresholds (kills needed for tier 1, 2, 3)
pub const POWER_TIER_THRESHOLDS: [u32; 3] = [2, 30, 100];

/// Kill counts that raise an on-screen difficulty alert, in order
pub const ALERT_THRESHOLDS: [u32; 3] = [100, 150, 300];
const ALERT_MESSAGES: [&str; 3] = [
    "Stage 2: enemies swarm faster!",
    "Rushers are on the hunt!",
    "Elite forces incoming!",
];

/// Spawn interval before and after stage 1
pub const SPAWN_RATE_NORMAL: f32 = 1.0;
pub const SPAWN_RATE_FAST: f32 = 0.7;

fn tier_from_thresholds(kills: u32, thresholds: &[u32; 3]) -> u8 {
    thresholds.iter().filter(|&&t| kills >= t).count() as u8
}

/// Coarse difficulty band (0-3)
pub fn stage_for_kills(kills: u32) -> u8 {
    (kills / KILLS_PER_STAGE).min(MAX_STAGE as u32) as u8
}

/// Wave-mix tier (0-3)
pub fn wave_tier_for_kills(kills: u32) -> u8 {
    tier_from_thresholds(kills, &WAVE_TIER_THRESHOLDS)
}

/// Power-up eligibility tier (0-3)
pub fn power_tier_for_kills(kills: u32) -> u8 {
    tier_from_thresholds(kills, &POWER_TIER_THRESHOLDS)
}

/// Highest ability level achievable at a power tier
pub fn max_level_for_tier(tier: u8) -> u8 {
    tier.min(crate::consts::MAX_ABILITY_LEVEL)
}

/// Chance that a normal kill drops a power-up
pub fn drop_chance_for_tier(tier: u8) -> f64 {
    match tier {
        0 => 0.0,
        1 => 0.20,
        2 => 0.10,
        _ => 0.05,
    }
}

/// Seconds between waves
pub fn spawn_rate_for_kills(kills: u32) -> f32 {
    if stage_for_kills(kills) >= 1 {
        SPAWN_RATE_FAST
    } else {
        SPAWN_RATE_NORMAL
    }
}

/// Concurrent shooter cap (`None` = unlimited)
pub fn normal_enemy_cap(kills: u32) -> Option<usize> {
    match kills {
        0..5 => Some(2),
        5..10 => Some(5),
        _ => None,
    }
}

/// Concurrent boss cap for a stage (`None` = unlimited)
pub fn boss_cap_for_stage(stage: u8) -> Option<usize> {
    match stage {
        0 | 1 => Some(1),
        2 => Some(3),
        _ => None,
    }
}

/// Number of alert thresholds reached at this kill count
pub fn alert_level_for_kills(kills: u32) -> u8 {
    ALERT_THRESHOLDS.iter().filter(|&&t| kills >= t).count() as u8
}

/// Message shown when `level` is first reached (1-based)
pub fn alert_message(level: u8) -> Option<&'static str> {
    match level {
        1..=3 => Some(ALERT_MESSAGES[level as usize - 1]),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_stage_boundaries() {
        assert_eq!(stage_for_kills(0), 0);
        assert_eq!(stage_for_kills(99), 0);
        assert_eq!(stage_for_kills(100), 1);
        assert_eq!(stage_for_kills(299), 2);
        assert_eq!(stage_for_kills(300), 3);
        assert_eq!(stage_for_kills(10_000), 3);
    }

    #[test]
    fn test_wave_tier_boundaries() {
        assert_eq!(wave_tier_for_kills(14), 0);
        assert_eq!(wave_tier_for_kills(15), 1);
        assert_eq!(wave_tier_for_kills(30), 2);
        assert_eq!(wave_tier_for_kills(49), 2);
        assert_eq!(wave_tier_for_kills(50), 3);
    }

    #[test]
    fn test_power_tier_boundaries() {
        assert_eq!(power_tier_for_kills(1), 0);
        assert_eq!(power_tier_for_kills(2), 1);
        assert_eq!(power_tier_for_kills(30), 2);
        assert_eq!(power_tier_for_kills(100), 3);
    }

    #[test]
    fn test_caps() {
        assert_eq!(normal_enemy_cap(4), Some(2));
        assert_eq!(normal_enemy_cap(5), Some(5));
        assert_eq!(normal_enemy_cap(10), None);
        assert_eq!(boss_cap_for_stage(1), Some(1));
        assert_eq!(boss_cap_for_stage(2), Some(3));
        assert_eq!(boss_cap_for_stage(3), None);
    }

    #[test]
    fn test_spawn_rate() {
        assert_eq!(spawn_rate_for_kills(99), SPAWN_RATE_NORMAL);
        assert_eq!(spawn_rate_for_kills(100), SPAWN_RATE_FAST);
    }

    #[test]
    fn test_alert_levels() {
        assert_eq!(alert_level_for_kills(99), 0);
        assert_eq!(alert_level_for_kills(100), 1);
        assert_eq!(alert_level_for_kills(150), 2);
        assert_eq!(alert_level_for_kills(300), 3);
        assert!(alert_message(0).is_none());
        assert!(alert_message(3).is_some());
    }

    proptest! {
        #[test]
        fn max_level_is_monotonic_and_capped(a in 0u8..=255, b in 0u8..=255) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(max_level_for_tier(lo) <= max_level_for_tier(hi));
            prop_assert!(max_level_for_tier(hi) <= 3);
        }

        #[test]
        fn tiers_are_monotonic_in_kills(a in 0u32..1000, b in 0u32..1000) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(stage_for_kills(lo) <= stage_for_kills(hi));
            prop_assert!(wave_tier_for_kills(lo) <= wave_tier_for_kills(hi));
            prop_assert!(power_tier_for_kills(lo) <= power_tier_for_kills(hi));
        }
    }
}
