//! Runner settings with persistence
//!
//! Settings are saved to `~/.config/stride/settings.toml`

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use stride_core::TimeConfig;
use stride_game::{LocomotionConfig, LocomotionPreset};
use tracing::{info, warn};

/// All simulation settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimSettings {
    pub time: TimeConfig,
    pub simulation: SimulationSettings,
    /// Full tuning; replaces the preset when present
    pub locomotion: Option<LocomotionConfig>,
}

impl SimSettings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("stride"))
    }

    /// Get the settings file path
    fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.toml"))
    }

    /// Load settings from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            warn!("Could not determine config directory");
            return Self::default();
        };

        if !path.exists() {
            info!("No settings file found, using defaults");
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(settings) => {
                info!("Loaded settings from {:?}", path);
                settings
            }
            Err(e) => {
                warn!("{:#}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Load settings from a specific file
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        toml::from_str(&content).context("Failed to parse settings")
    }

    /// Save settings to disk
    pub fn save(&self) -> anyhow::Result<PathBuf> {
        let Some(dir) = Self::config_dir() else {
            anyhow::bail!("Could not determine config directory");
        };

        let path = dir.join("settings.toml");

        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        info!("Saved settings to {:?}", path);
        Ok(path)
    }

    /// Tuning to run with: the explicit table if given, else the preset
    pub fn locomotion_config(&self) -> LocomotionConfig {
        match &self.locomotion {
            Some(config) => config.clone(),
            None => LocomotionConfig::preset(self.simulation.preset),
        }
    }
}

/// How the runner drives the simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Render rate whose frame deltas feed the fixed-step clock
    pub frame_rate: f32,
    /// Named tuning used when no `[locomotion]` table is given
    pub preset: LocomotionPreset,
    /// Default log filter when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            frame_rate: 144.0,
            preset: LocomotionPreset::Default,
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let settings: SimSettings = toml::from_str("").unwrap();
        assert_eq!(settings.simulation.frame_rate, 144.0);
        assert_eq!(settings.simulation.preset, LocomotionPreset::Default);
        assert!(settings.locomotion.is_none());
    }

    #[test]
    fn test_preset_selection() {
        let settings: SimSettings = toml::from_str(
            r#"
            [simulation]
            preset = "floaty"
            log_level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(settings.locomotion_config().mover.run_speed, 6.0);
        assert_eq!(settings.simulation.log_level, "debug");
    }

    #[test]
    fn test_explicit_locomotion_overrides_preset() {
        let settings: SimSettings = toml::from_str(
            r#"
            [simulation]
            preset = "floaty"

            [locomotion.mover]
            jump_force = 6.5

            [time]
            fixed_timestep = 0.01
            "#,
        )
        .unwrap();
        let config = settings.locomotion_config();
        assert_eq!(config.mover.jump_force, 6.5);
        assert_eq!(config.mover.run_speed, 4.0);
        assert_eq!(settings.time.fixed_timestep, 0.01);
    }

    #[test]
    fn test_round_trip_through_toml() {
        let settings = SimSettings::default();
        let text = toml::to_string_pretty(&settings).unwrap();
        let back: SimSettings = toml::from_str(&text).unwrap();
        assert_eq!(back.simulation.log_level, settings.simulation.log_level);
    }
}
