//! Configuration management for SkillTree.
//!
//! Configuration is loaded from multiple sources with the following priority:
//! 1. Environment variables (highest priority)
//! 2. Project-local `skilltree.toml` file
//! 3. User config `~/.config/skilltree/config.toml`
//! 4. Built-in defaults (lowest priority)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::engine::UnlockSweep;

mod defaults;

pub use defaults::*;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,

    /// Progression rules.
    pub progression: ProgressionConfig,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// Searches for config in order:
    /// 1. `./skilltree.toml` (project local)
    /// 2. `~/.config/skilltree/config.toml` (user config)
    /// 3. Falls back to defaults
    ///
    /// Environment overrides apply in every case.
    pub fn load() -> Result<Self, ConfigError> {
        if Path::new(LOCAL_CONFIG_FILE).exists() {
            return Self::from_file(LOCAL_CONFIG_FILE);
        }

        if let Some(user_config) = Self::user_config_path() {
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        let mut config = Self::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml(&content)?;

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Parse configuration from TOML text without env overrides.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Path of the user-level config file, if a config dir is known.
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(USER_CONFIG_DIR).join(USER_CONFIG_FILE))
    }

    /// Apply environment variable overrides.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Apply overrides from an arbitrary variable lookup.
    ///
    /// Values that fail to parse are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        // Storage overrides
        if let Some(dir) = lookup("SKILLTREE_DATA_DIR") {
            self.storage.data_dir = dir;
        }
        if let Some(key) = lookup("SKILLTREE_STATE_KEY") {
            self.storage.state_key = key;
        }

        // Progression overrides
        if let Some(exp) = lookup("SKILLTREE_EXP_PER_ACTION") {
            if let Ok(n) = exp.parse() {
                self.progression.exp_per_action = n;
            }
        }
        if let Some(sweep) = lookup("SKILLTREE_UNLOCK_SWEEP") {
            if let Some(sweep) = UnlockSweep::parse(&sweep) {
                self.progression.unlock_sweep = sweep;
            }
        }
    }

    /// Check values the types cannot rule out.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.progression.exp_per_action == 0 {
            return Err(ConfigError::Invalid(
                "progression.exp_per_action must be greater than zero".to_string(),
            ));
        }
        if self.storage.state_key.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "storage.state_key must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Create a default config file content as a string.
    pub fn default_config_string() -> String {
        Config::default().to_toml_string()
    }

    /// Render this config as TOML.
    pub fn to_toml_string(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }
}

/// Storage configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding persisted state (default: ".skilltree").
    pub data_dir: String,

    /// Key the progression state is stored under.
    pub state_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: DEFAULT_DATA_DIR.to_string(),
            state_key: DEFAULT_STATE_KEY.to_string(),
        }
    }
}

impl StorageConfig {
    /// Get the data directory as a path.
    pub fn data_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir)
    }
}

/// Progression configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionConfig {
    /// Experience awarded by one training action.
    pub exp_per_action: u32,

    /// Whether the unlock sweep runs once or to a fixed point.
    pub unlock_sweep: UnlockSweep,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            exp_per_action: DEFAULT_EXP_PER_ACTION,
            unlock_sweep: DEFAULT_UNLOCK_SWEEP,
        }
    }
}
