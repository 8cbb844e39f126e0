//! Game configuration loaded from `config.json` in the platform config dir.

use super::constants::*;
use crate::utils::persistence::{config_dir, load_json};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};

/// User-tunable settings. Missing fields fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Length of one simulation tick in milliseconds
    pub tick_ms: u64,

    /// Logical world width in pixels
    pub world_width: f64,

    /// Logical world height in pixels
    pub world_height: f64,

    /// Random seed for reproducible runs (None = entropy)
    pub seed: Option<u64>,

    /// Leaderboard length
    pub max_high_scores: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tick_ms: TICK_INTERVAL_MS,
            world_width: DEFAULT_WORLD_WIDTH,
            world_height: DEFAULT_WORLD_HEIGHT,
            seed: None,
            max_high_scores: DEFAULT_MAX_HIGH_SCORES,
        }
    }
}

impl GameConfig {
    /// Default config file location.
    pub fn default_path() -> io::Result<PathBuf> {
        Ok(config_dir()?.join("config.json"))
    }

    /// Load and validate a config file. A missing file yields the defaults.
    pub fn load(path: &Path) -> io::Result<Self> {
        let config = match load_json::<GameConfig>(path)? {
            Some(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            None => {
                log::info!("No config at {}, using defaults", path.display());
                Self::default()
            }
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the simulation cannot run with.
    pub fn validate(&self) -> io::Result<()> {
        let invalid =
            |msg: String| -> io::Result<()> { Err(io::Error::new(io::ErrorKind::InvalidData, msg)) };

        if self.tick_ms == 0 {
            return invalid("tick_ms must be greater than zero".to_string());
        }
        if !(self.world_width.is_finite() && self.world_width > 0.0) {
            return invalid(format!("world_width must be positive, got {}", self.world_width));
        }
        if !(self.world_height.is_finite() && self.world_height > 0.0) {
            return invalid(format!(
                "world_height must be positive, got {}",
                self.world_height
            ));
        }
        // Player sprites scale with the width, so a short wide world leaves no
        // room between the floor and the ceiling
        let ceiling = self.world_height * CEILING_FRACTION - self.world_width * SPRITE_SCALE;
        if ceiling <= 0.0 {
            return invalid(format!(
                "world {}x{} leaves no room to fly (ceiling at {})",
                self.world_width, self.world_height, ceiling
            ));
        }
        if self.max_high_scores == 0 {
            return invalid("max_high_scores must be at least 1".to_string());
        }
        Ok(())
    }
}
