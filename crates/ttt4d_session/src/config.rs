use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};
use ttt4d_core::board::{MAX_SIZE, MIN_SIZE, STANDARD_SIZE};
use ttt4d_engine::search::{MAX_DEPTH, MIN_DEPTH};
use ttt4d_engine::Difficulty;

use crate::error::ConfigError;

/// Session settings, loadable from TOML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub size: usize,
    pub difficulty: Difficulty,
    /// Overrides the depth implied by `difficulty`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_depth: Option<u8>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            size: STANDARD_SIZE,
            difficulty: Difficulty::default(),
            search_depth: None,
        }
    }
}

impl SessionConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: SessionConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&self.size) {
            return Err(ConfigError::Validation(format!(
                "size must be in {MIN_SIZE}..={MAX_SIZE}, got {}",
                self.size
            )));
        }
        if let Some(depth) = self.search_depth {
            if !(MIN_DEPTH..=MAX_DEPTH).contains(&depth) {
                return Err(ConfigError::Validation(format!(
                    "search_depth must be in {MIN_DEPTH}..={MAX_DEPTH}, got {depth}"
                )));
            }
        }
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    /// Plies the AI searches, explicit override first.
    pub fn depth(&self) -> u8 {
        self.search_depth.unwrap_or_else(|| self.difficulty.depth())
    }
}
