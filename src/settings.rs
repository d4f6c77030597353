//! Race settings
//!
//! Loaded from a JSON file on native targets. Missing fields take defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_BLOCKS_COUNT, MAX_SUBSTEPS, SIM_HZ};
use crate::sim::{DEFAULT_OBSTACLE_TYPES, LevelError, SegmentType};

/// Default number of obstacle blocks
pub const DEFAULT_BLOCKS_COUNT: i64 = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Obstacle blocks between start and finish
    pub blocks_count: i64,
    /// Layout seed
    pub block_seed: u64,
    /// Obstacle types to sample from
    pub obstacle_types: Vec<SegmentType>,

    // === Simulation ===
    /// Fixed tick rate (Hz)
    pub sim_hz: u32,
    /// Maximum fixed steps per frame
    pub max_substeps: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            blocks_count: DEFAULT_BLOCKS_COUNT,
            block_seed: 0,
            obstacle_types: DEFAULT_OBSTACLE_TYPES.to_vec(),
            sim_hz: SIM_HZ,
            max_substeps: MAX_SUBSTEPS,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Check values the level generator would reject
    pub fn validate(&self) -> Result<(), LevelError> {
        if !(0..=i64::from(MAX_BLOCKS_COUNT)).contains(&self.blocks_count) {
            return Err(LevelError::InvalidArgument(format!(
                "blocks_count must be in 0..={}, got {}",
                MAX_BLOCKS_COUNT, self.blocks_count
            )));
        }
        if self.obstacle_types.is_empty() {
            return Err(LevelError::InvalidArgument(
                "obstacle_types must not be empty".to_string(),
            ));
        }
        if let Some(kind) = self.obstacle_types.iter().find(|t| !t.is_obstacle()) {
            return Err(LevelError::InvalidArgument(format!(
                "obstacle_types: `{}` is not an obstacle type",
                kind
            )));
        }
        if self.sim_hz == 0 {
            return Err(LevelError::InvalidArgument(
                "sim_hz must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not read {}: {} - using default settings", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings in {}: {} - using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let json = self.to_json().map_err(std::io::Error::other)?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.blocks_count, 10);
        assert_eq!(settings.obstacle_types.len(), 3);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "block_seed": 99, "obstacle_types": ["axe"] }"#)
            .unwrap();
        assert_eq!(settings.block_seed, 99);
        assert_eq!(settings.obstacle_types, vec![SegmentType::SwingingAxe]);
        assert_eq!(settings.blocks_count, DEFAULT_BLOCKS_COUNT);
        assert_eq!(settings.sim_hz, SIM_HZ);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let settings = Settings {
            blocks_count: -3,
            ..Default::default()
        };
        assert!(settings.validate().is_err());

        let settings = Settings {
            obstacle_types: Vec::new(),
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validate_caps_blocks_count() {
        let settings = Settings {
            blocks_count: i64::from(MAX_BLOCKS_COUNT),
            ..Default::default()
        };
        assert!(settings.validate().is_ok());

        let settings = Settings {
            blocks_count: i64::from(MAX_BLOCKS_COUNT) + 1,
            ..Default::default()
        };
        assert!(matches!(settings.validate(), Err(LevelError::InvalidArgument(_))));
    }

    #[test]
    fn test_validate_rejects_start_and_end_types() {
        for kind in [SegmentType::Start, SegmentType::End] {
            let settings = Settings {
                obstacle_types: vec![SegmentType::LimboBar, kind],
                ..Default::default()
            };
            assert!(matches!(settings.validate(), Err(LevelError::InvalidArgument(_))));
        }

        // Agrees with what the generator accepts
        let settings = Settings::from_json(r#"{ "obstacle_types": ["spinner", "end"] }"#).unwrap();
        let generated = crate::sim::generate(
            settings.blocks_count,
            settings.block_seed,
            &settings.obstacle_types,
        );
        assert_eq!(settings.validate().is_err(), generated.is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            blocks_count: 25,
            block_seed: 1234,
            ..Default::default()
        };
        let back = Settings::from_json(&settings.to_json().unwrap()).unwrap();
        assert_eq!(back, settings);
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let settings = Settings::load("/nonexistent/marble-race.json");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!("marble-race-{}.json", std::process::id()));
        let settings = Settings {
            block_seed: 77,
            ..Default::default()
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path), settings);
        let _ = std::fs::remove_file(&path);
    }
}
