//! Game settings and preferences
//!
//! Persisted as JSON next to the leaderboard. Unknown or missing fields fall
//! back to their defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::persistence::{self, PersistenceError};
use crate::sim::{GameMode, Skin};

/// Environment variable overriding the settings file location
pub const SETTINGS_ENV: &str = "SKYFLAP_SETTINGS";

/// Default settings file location
pub const DEFAULT_SETTINGS_PATH: &str = "data/settings.json";

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Mode preselected on the main menu
    pub mode: GameMode,
    pub skin: Skin,

    // === Gameplay ===
    /// Random events on/off
    pub events_enabled: bool,
    /// Hitbox overlay and manual event triggers
    pub debug_mode: bool,

    // === Leaderboard ===
    /// Name used when submitting scores
    pub player_name: String,
    pub leaderboard_path: PathBuf,

    // === Audio ===
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: GameMode::Adventure,
            skin: Skin::Red,
            events_enabled: true,
            debug_mode: false,
            player_name: "Player".to_string(),
            leaderboard_path: PathBuf::from("data/leaderboard.json"),
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl Settings {
    /// Settings file location: `$SKYFLAP_SETTINGS` or the default path
    pub fn path() -> PathBuf {
        std::env::var_os(SETTINGS_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_PATH))
    }

    /// Load settings; a missing or corrupt file gives the defaults
    pub fn load() -> Self {
        Self::load_from(&Self::path())
    }

    pub fn load_from(path: &Path) -> Self {
        let mut settings: Self = persistence::load_or_default(path, "settings");
        settings.sfx_volume = settings.sfx_volume.clamp(0.0, 1.0);
        settings
    }

    pub fn save(&self) -> Result<(), PersistenceError> {
        self.save_to(&Self::path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), PersistenceError> {
        persistence::save_json(path, self)?;
        log::info!("Settings saved");
        Ok(())
    }

    /// Volume actually applied to cues
    pub fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.sfx_volume }
    }
}
