//! Configuration for pqrunner.
//!
//! Handles loading configuration from a TOML file with environment variable
//! overrides. All settings are process-lifetime state with no persistence
//! across restarts.

use crate::error::{PqError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding the executable path.
pub const EXECUTABLE_ENV: &str = "PQRUNNER_EXECUTABLE";

/// Process-wide configuration for driving the primusquery executable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the primusquery executable.
    #[serde(default = "default_executable")]
    pub executable: PathBuf,

    /// Emit diagnostic detail (subprocess output, rendered query dumps).
    #[serde(default)]
    pub debug: bool,

    /// Deadline for the index-refresh call, in seconds.
    #[serde(default = "default_update_timeout")]
    pub update_timeout_secs: u64,
}

fn default_executable() -> PathBuf {
    PathBuf::from("./primusquery")
}

fn default_update_timeout() -> u64 {
    60
}

impl Default for Config {
    fn default() -> Self {
        Self {
            executable: default_executable(),
            debug: false,
            update_timeout_secs: default_update_timeout(),
        }
    }
}

impl Config {
    /// Returns the default config file path for the current platform.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("pqrunner")
            .join("config.toml")
    }

    /// Loads configuration from a TOML file.
    ///
    /// A missing file yields the defaults. The `PQRUNNER_EXECUTABLE`
    /// environment variable, when set, overrides the executable path from
    /// any source.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content =
                std::fs::read_to_string(path).map_err(|e| PqError::io(path, e))?;
            Self::parse_toml(&content, path)?
        } else {
            Self::default()
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parses configuration from a TOML string.
    fn parse_toml(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            PqError::config(format!(
                "Configuration error in {}:\n  {}",
                path.display(),
                e
            ))
        })
    }

    /// Applies environment variable overrides.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(exe) = std::env::var(EXECUTABLE_ENV) {
            self.executable = PathBuf::from(exe);
        }
    }
}
