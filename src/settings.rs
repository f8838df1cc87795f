//! Game settings and preferences
//!
//! Stored as JSON next to the game. Missing or unreadable settings fall back
//! to defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    // === Progress ===
    /// Stage to start on (1-based)
    pub start_stage: u32,
    /// Level pack to load
    pub level_pack: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            start_stage: 1,
            level_pack: PathBuf::from("assets/stages.json"),
        }
    }
}

impl Settings {
    /// Default settings file name
    pub const FILE_NAME: &'static str = "gremlin-stars.json";

    /// Load settings, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::try_load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(SettingsError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring settings at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn try_load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        let mut settings: Settings = serde_json::from_str(&json)?;
        settings.sanitize();
        Ok(settings)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved");
        Ok(())
    }

    /// Clamp values into range
    fn sanitize(&mut self) {
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self.start_stage = self.start_stage.max(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("gremlin-stars-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let settings = Settings::load(temp_path("missing.json"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_partial_json_fills_defaults_and_clamps() {
        let path = temp_path("partial.json");
        std::fs::write(&path, r#"{"master_volume": 2.5, "start_stage": 0}"#).unwrap();
        let settings = Settings::try_load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(settings.master_volume, 1.0);
        assert_eq!(settings.start_stage, 1);
        assert_eq!(settings.sfx_volume, 1.0);
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("saved.json");
        let settings = Settings {
            muted: true,
            start_stage: 3,
            ..Default::default()
        };
        settings.save(&path).unwrap();
        let loaded = Settings::load(&path);
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_invalid_json_falls_back() {
        let path = temp_path("broken.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(Settings::try_load(&path), Err(SettingsError::Json(_))));
        assert_eq!(Settings::load(&path), Settings::default());
        std::fs::remove_file(&path).ok();
    }
}
