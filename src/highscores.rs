//! High score tracking
//!
//! A single best score, loaded once at startup and written back whenever a
//! finished run beats it. Storage failures never reach gameplay.

use crate::persistence::HighScoreStore;

/// Best score seen across sessions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighScore {
    pub best: u64,
}

impl HighScore {
    pub fn new(best: u64) -> Self {
        Self { best }
    }

    /// Load from `store`, treating missing or unreadable data as no score yet
    pub fn load(store: &impl HighScoreStore) -> Self {
        match store.load_high_score() {
            Ok(Some(best)) => {
                log::info!("Loaded high score {best}");
                Self { best }
            }
            Ok(None) => {
                log::info!("No high score found, starting fresh");
                Self::default()
            }
            Err(err) => {
                log::warn!("Could not load high score: {err}");
                Self::default()
            }
        }
    }

    /// Check if a score would become the new best
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.best
    }

    /// Record `score` if it beats the best and persist it.
    /// Returns true if the best changed (even when the write was skipped).
    pub fn submit(&mut self, score: u64, store: &mut impl HighScoreStore) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.best = score;
        match store.save_high_score(score) {
            Ok(()) => log::info!("High score saved ({score})"),
            Err(err) => log::warn!("High score write skipped: {err}"),
        }
        true
    }
}
