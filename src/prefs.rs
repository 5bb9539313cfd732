//! Persisted user preferences.
//!
//! The only preference is the dark-mode flag, stored as TOML at
//! `~/.config/triagem/preferences.toml` (platform config dir). A missing file
//! means defaults; a corrupt file is logged and treated as missing.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{Result, TriagemError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub dark_mode: bool,
}

impl Preferences {
    /// Default preferences path: `<config_dir>/triagem/preferences.toml`.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join("triagem")
            .join("preferences.toml")
    }

    /// Load preferences, falling back to defaults on a missing or corrupt file.
    pub fn load(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read preferences");
                return Self::default();
            }
        };
        match toml::from_str(&content) {
            Ok(prefs) => prefs,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "corrupt preferences file");
                Self::default()
            }
        }
    }

    /// Save preferences (atomic write via tmp + rename).
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                TriagemError::Configuration(format!(
                    "failed to create preferences dir {}: {e}",
                    parent.display()
                ))
            })?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        let content = toml::to_string(self).map_err(|e| {
            TriagemError::Configuration(format!("failed to serialize preferences: {e}"))
        })?;
        std::fs::write(&tmp_path, content).map_err(|e| {
            TriagemError::Configuration(format!(
                "failed to write preferences file {}: {e}",
                tmp_path.display()
            ))
        })?;
        std::fs::rename(&tmp_path, path).map_err(|e| {
            TriagemError::Configuration(format!(
                "failed to rename preferences file {} → {}: {e}",
                tmp_path.display(),
                path.display()
            ))
        })?;

        Ok(())
    }

    /// Flip dark mode and return the new value.
    pub fn toggle_dark_mode(&mut self) -> bool {
        self.dark_mode = !self.dark_mode;
        self.dark_mode
    }
}
