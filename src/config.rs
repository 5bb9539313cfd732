//! Configuration loading for the triagem client.
//!
//! Configuration is loaded from TOML files with the following resolution order:
//! 1. `--config <path>` (CLI flag, must exist)
//! 2. `~/.triagem/config.toml` (user)
//! 3. `/etc/triagem/config.toml` (system)
//!
//! When no file is found the built-in defaults are used.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use crate::types::InputLimits;
use crate::{Result, TriagemError};

/// Client configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub limits: InputLimits,
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Classification service connection.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// Base URL of the service (default: http://127.0.0.1:5000).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds (default: 60).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ServiceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

/// Terminal presentation settings.
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    /// Delay between characters of the typed reply, in milliseconds (default: 30).
    /// Zero prints the reply at once.
    #[serde(default = "default_typewriter_delay_ms")]
    pub typewriter_delay_ms: u64,
    /// Width of the confidence meter in cells (default: 20).
    #[serde(default = "default_bar_width")]
    pub confidence_bar_width: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            typewriter_delay_ms: default_typewriter_delay_ms(),
            confidence_bar_width: default_bar_width(),
        }
    }
}

impl DisplayConfig {
    pub fn typewriter_delay(&self) -> Duration {
        Duration::from_millis(self.typewriter_delay_ms)
    }
}

fn default_typewriter_delay_ms() -> u64 {
    30
}

fn default_bar_width() -> usize {
    20
}

impl Config {
    /// Load configuration from the standard locations.
    ///
    /// Resolution order:
    /// 1. Explicit path (if provided; an error if missing)
    /// 2. `~/.triagem/config.toml`
    /// 3. `/etc/triagem/config.toml`
    /// 4. Defaults
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        match Self::resolve_config_path(explicit_path)? {
            Some(path) => Self::load_from_file(&path),
            None => {
                debug!("no config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            TriagemError::Configuration(format!("Failed to read config file {path:?}: {e}"))
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| {
            TriagemError::Configuration(format!("Failed to parse config file {path:?}: {e}"))
        })?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Resolve the config file path, if any.
    fn resolve_config_path(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit {
            if path.exists() {
                return Ok(Some(path.to_path_buf()));
            }
            return Err(TriagemError::Configuration(format!(
                "Config file not found: {path:?}"
            )));
        }

        // User config
        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".triagem").join("config.toml");
            if user_config.exists() {
                return Ok(Some(user_config));
            }
        }

        // System config
        let system_config = PathBuf::from("/etc/triagem/config.toml");
        if system_config.exists() {
            return Ok(Some(system_config));
        }

        Ok(None)
    }
}
