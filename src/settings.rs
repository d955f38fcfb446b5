//! Game settings and preferences
//!
//! Persisted separately from the high score.

use serde::{Deserialize, Serialize};

use crate::persistence::{Storage, load_json, save_json};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    /// Background stars for this preset
    pub fn star_count(&self) -> usize {
        match self {
            QualityPreset::Low => 60,
            QualityPreset::Medium => 120,
            QualityPreset::High => 200,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Camera shake on kills and hits
    pub screen_shake: bool,
    /// Show FPS counter
    pub show_fps: bool,
    /// Reduced motion (suppresses shake)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            screen_shake: true,
            show_fps: false,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "shoot_em_up_settings";

    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    pub fn star_count(&self) -> usize {
        self.quality.star_count()
    }

    /// Load settings, falling back to defaults
    pub fn load(store: &impl Storage) -> Self {
        match load_json(store, Self::STORAGE_KEY) {
            Ok(Some(settings)) => {
                log::info!("Loaded settings");
                settings
            }
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(err) => {
                log::warn!("Could not load settings, using defaults: {err}");
                Self::default()
            }
        }
    }

    pub fn save(&self, store: &mut impl Storage) {
        match save_json(store, Self::STORAGE_KEY, self) {
            Ok(()) => log::info!("Settings saved"),
            Err(err) => log::warn!("Settings not saved: {err}"),
        }
    }
}
