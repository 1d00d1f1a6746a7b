use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::cache::DEFAULT_CACHE_CAPACITY;
use crate::error::{AppResult, SettingsError};

fn default_cache_capacity() -> usize {
    DEFAULT_CACHE_CAPACITY
}

fn default_true() -> bool {
    true
}

/// Tunables for the playback core, loadable from JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioSettings {
    /// Maximum number of cached nodes retained for reuse
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,

    /// Default playback duration in milliseconds for non-looping sounds
    pub default_duration_ms: u64,

    /// Default volume multiplier (0.0-1.0)
    pub default_volume: f32,

    /// Whether on-demand cached sounds start enabled
    #[serde(default = "default_true")]
    pub cached_sounds_enabled: bool,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            default_duration_ms: 1000,
            default_volume: 1.0,
            cached_sounds_enabled: true,
        }
    }
}

impl AudioSettings {
    /// Load settings from a JSON file.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path).map_err(|e| SettingsError::LoadFailed {
            path: path.display().to_string(),
            source: Box::new(e),
        })?;
        let settings: AudioSettings =
            serde_json::from_str(&content).map_err(|e| SettingsError::LoadFailed {
                path: path.display().to_string(),
                source: Box::new(e),
            })?;
        settings.validate()?;
        tracing::info!("Loaded audio settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults when the file doesn't exist.
    pub fn load_or_default(path: &Path) -> AppResult<Self> {
        if path.exists() {
            Self::load_from(path)
                .with_context(|| format!("loading audio settings from {}", path.display()))
        } else {
            tracing::info!(
                "No audio settings at {}, using defaults",
                path.display()
            );
            Ok(Self::default())
        }
    }

    /// Save settings to a JSON file, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| SettingsError::SaveFailed {
                path: path.display().to_string(),
                source: Box::new(e),
            })?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|e| SettingsError::SaveFailed {
            path: path.display().to_string(),
            source: Box::new(e),
        })?;
        fs::write(path, json).map_err(|e| SettingsError::SaveFailed {
            path: path.display().to_string(),
            source: Box::new(e),
        })?;

        Ok(())
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self.cache_capacity == 0 {
            return Err(SettingsError::Invalid(
                "cache_capacity must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.default_volume) {
            return Err(SettingsError::Invalid(format!(
                "default_volume must be within 0.0-1.0, got {}",
                self.default_volume
            )));
        }
        Ok(())
    }
}
