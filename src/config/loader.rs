use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

use crate::config::types::{Config, PublisherKind};
use crate::joints::{JointStore, LayoutError};

/// Digit keys `1`-`9` are the only selection keys.
pub const MAX_JOINTS: usize = 9;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl From<LayoutError> for ConfigError {
    fn from(err: LayoutError) -> Self {
        ConfigError::ValidationError {
            message: format!("invalid joint layout: {}", err),
        }
    }
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/joint-teleop/config.toml` on Linux, or the platform
    /// equivalent via `dirs::config_dir()`. Falls back to the current
    /// directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("joint-teleop").join("config.toml")
    }

    /// Loads configuration from the default config file.
    ///
    /// A missing default file yields `Config::default()`.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();
        if !path.exists() {
            return Ok(Config::default());
        }
        Self::load_from(&path)
    }

    /// Loads and validates configuration from an explicit path.
    ///
    /// Unlike [`Config::load`], a missing file is an error.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - The joint layout is non-empty, has unique names and fits the digit keys
    /// - The step size is positive and finite
    /// - The selected transport has its destination configured
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.joint_store()?;

        if self.joints.names.len() > MAX_JOINTS {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "{} joints configured but only {} can be selected with digit keys",
                    self.joints.names.len(),
                    MAX_JOINTS
                ),
            });
        }

        let step = self.joints.step_size;
        if !step.is_finite() || step <= 0.0 {
            return Err(ConfigError::ValidationError {
                message: format!("step_size must be a positive number, got {}", step),
            });
        }

        match self.publisher.kind {
            PublisherKind::Udp if self.publisher.target.is_none() => {
                return Err(ConfigError::ValidationError {
                    message: "udp publisher requires a target address".to_string(),
                });
            }
            PublisherKind::Jsonl if self.publisher.path.is_none() => {
                return Err(ConfigError::ValidationError {
                    message: "jsonl publisher requires an output path".to_string(),
                });
            }
            _ => {}
        }

        Ok(())
    }

    /// Build the joint store described by `[joints]`.
    pub fn joint_store(&self) -> Result<JointStore, ConfigError> {
        let names = self.joints.names.clone();
        let store = match &self.joints.initial_positions {
            Some(positions) => JointStore::with_positions(names, positions.clone())?,
            None => JointStore::new(names)?,
        };
        Ok(store)
    }

    pub fn poll_timeout(&self) -> Duration {
        Duration::from_millis(self.timing.poll_timeout_ms)
    }

    pub fn spin_timeout(&self) -> Duration {
        Duration::from_millis(self.timing.spin_timeout_ms)
    }
}
