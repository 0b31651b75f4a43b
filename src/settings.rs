//! Game settings and preferences
//!
//! Read once at startup from a JSON file. Anything missing takes its default,
//! and an unreadable or malformed file falls back to defaults with a warning.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    /// Maximum particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 100,
            QualityPreset::Medium => 500,
            QualityPreset::High => 2000,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Particle effects (debris, sparks)
    pub particles: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Start with sound muted
    pub start_muted: bool,
    /// Directory holding the sound effect files
    pub asset_dir: PathBuf,

    // === Simulation ===
    /// Fixed RNG seed; a time-based seed is used when absent
    pub seed: Option<u64>,
    /// JSON file with level definitions; built-in levels when absent
    pub levels_file: Option<PathBuf>,
    /// How long the native attract-mode demo runs
    pub demo_seconds: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            particles: true,
            master_volume: 1.0,
            start_muted: false,
            asset_dir: PathBuf::from("assets"),
            seed: None,
            levels_file: None,
            demo_seconds: 30,
        }
    }
}

impl Settings {
    /// Environment variable naming the settings file
    pub const ENV_VAR: &'static str = "BRICKFALL_SETTINGS";

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Load settings from `path`, or defaults when absent or broken
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };
        match Self::from_file(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings: {}", e);
                Self::default()
            }
        }
    }

    /// Load from the file named by `BRICKFALL_SETTINGS`, if set
    pub fn load_from_env() -> Self {
        let path = std::env::var_os(Self::ENV_VAR).map(PathBuf::from);
        Self::load(path.as_deref())
    }
}
