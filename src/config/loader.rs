use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::Config;

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

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/remote-ui/config.toml` on Unix/macOS, or the
    /// platform equivalent via `dirs::config_dir()`. Falls back to the
    /// current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("remote-ui").join("config.toml")
    }

    /// Loads configuration from the default config file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from `path`.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - Otherwise parses it as TOML and validates.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }

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
    /// - The tick rate is non-zero
    /// - The provider timeout is non-zero
    /// - The error history keeps at least one entry
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.defaults.tick_rate_ms == 0 {
            return Err(ConfigError::ValidationError {
                message: "tick_rate_ms must be greater than zero".to_string(),
            });
        }

        if self.network.timeout_ms == 0 {
            return Err(ConfigError::ValidationError {
                message: "timeout_ms must be greater than zero".to_string(),
            });
        }

        if self.region.error_history == 0 {
            return Err(ConfigError::ValidationError {
                message: "error_history must keep at least one entry".to_string(),
            });
        }

        Ok(())
    }

    /// Serialize back to TOML, as printed by `--print-config`.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
