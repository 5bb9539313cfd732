//! User input: the active input mode, the selected file and the pasted text.
//!
//! [`ViewState`] is the explicit replacement for the page's ambient UI state.
//! Turning it into a [`Submission`] applies every local check, so a request is
//! only ever built from input the service can accept.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Result, TriagemError};

/// Media types the service accepts for uploads.
pub const SUPPORTED_MEDIA_TYPES: &[&str] = &["text/plain", "application/pdf"];

/// Media type assumed for files with an unknown extension.
const FALLBACK_MEDIA_TYPE: &str = "application/octet-stream";

/// Which input tab is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    #[default]
    Upload,
    Text,
}

impl InputMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upload => "file",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for InputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file picked for upload, with its declared media type.
#[derive(Clone, PartialEq, Eq)]
pub struct EmailFile {
    pub name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl EmailFile {
    pub fn new(
        name: impl Into<String>,
        media_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a file from disk, inferring the media type from its extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| TriagemError::InvalidInput(format!("not a file: {}", path.display())))?;
        Ok(Self {
            media_type: media_type_for(path).to_string(),
            name,
            bytes,
        })
    }

    pub fn is_supported(&self) -> bool {
        is_supported_media_type(&self.media_type)
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

// Keep file contents out of debug output.
impl fmt::Debug for EmailFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailFile")
            .field("name", &self.name)
            .field("media_type", &self.media_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

/// Media type for a path, by extension (case-insensitive).
pub fn media_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase());
    match ext.as_deref() {
        Some("txt") => "text/plain",
        Some("pdf") => "application/pdf",
        _ => FALLBACK_MEDIA_TYPE,
    }
}

pub fn is_supported_media_type(media_type: &str) -> bool {
    SUPPORTED_MEDIA_TYPES.contains(&media_type)
}

/// Local limits applied before a request is built.
#[derive(Debug, Clone, Deserialize)]
pub struct InputLimits {
    /// Minimum trimmed text length in characters (default: 10).
    #[serde(default = "default_min_text_chars")]
    pub min_text_chars: usize,
    /// Maximum text length in characters (default: 10 000).
    #[serde(default = "default_max_text_chars")]
    pub max_text_chars: usize,
    /// Maximum upload size in bytes (default: 5 MiB).
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: u64,
}

impl Default for InputLimits {
    fn default() -> Self {
        Self {
            min_text_chars: default_min_text_chars(),
            max_text_chars: default_max_text_chars(),
            max_file_bytes: default_max_file_bytes(),
        }
    }
}

fn default_min_text_chars() -> usize {
    10
}

fn default_max_text_chars() -> usize {
    10_000
}

fn default_max_file_bytes() -> u64 {
    5 * 1024 * 1024
}

/// A validated request payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    File(EmailFile),
    /// Trimmed text.
    Text(String),
}

impl Submission {
    pub fn mode(&self) -> InputMode {
        match self {
            Self::File(_) => InputMode::Upload,
            Self::Text(_) => InputMode::Text,
        }
    }
}

/// Explicit view state: the active tab, the selected file and the text box.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub active: InputMode,
    pub current_file: Option<EmailFile>,
    pub text: String,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// View state with the text tab active and the given content.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            active: InputMode::Text,
            current_file: None,
            text: text.into(),
        }
    }

    /// View state with the upload tab active and `file` selected.
    ///
    /// Unlike [`select_file`](Self::select_file) this does not check the media
    /// type; the check happens when the submission is built.
    pub fn with_file(file: EmailFile) -> Self {
        Self {
            active: InputMode::Upload,
            current_file: Some(file),
            text: String::new(),
        }
    }

    pub fn switch_to(&mut self, mode: InputMode) {
        self.active = mode;
    }

    /// Select a file for upload.
    ///
    /// An unsupported file is rejected and the previous selection is kept.
    pub fn select_file(&mut self, file: EmailFile) -> Result<()> {
        if !file.is_supported() {
            return Err(TriagemError::UnsupportedFileType {
                media_type: file.media_type,
            });
        }
        self.current_file = Some(file);
        Ok(())
    }

    /// Clear all input and return to the upload tab.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Build the submission for the active mode, applying all local checks.
    pub fn submission(&self, limits: &InputLimits) -> Result<Submission> {
        match self.active {
            InputMode::Upload => {
                let file = self
                    .current_file
                    .as_ref()
                    .ok_or(TriagemError::NoFileSelected)?;
                if !file.is_supported() {
                    return Err(TriagemError::UnsupportedFileType {
                        media_type: file.media_type.clone(),
                    });
                }
                if file.size() > limits.max_file_bytes {
                    return Err(TriagemError::FileTooLarge {
                        size: file.size(),
                        max: limits.max_file_bytes,
                    });
                }
                Ok(Submission::File(file.clone()))
            }
            InputMode::Text => {
                let content = self.text.trim();
                if content.is_empty() {
                    return Err(TriagemError::EmptyText);
                }
                let len = content.chars().count();
                if len < limits.min_text_chars {
                    return Err(TriagemError::TextTooShort {
                        len,
                        min: limits.min_text_chars,
                    });
                }
                if len > limits.max_text_chars {
                    return Err(TriagemError::TextTooLong {
                        len,
                        max: limits.max_text_chars,
                    });
                }
                Ok(Submission::Text(content.to_string()))
            }
        }
    }
}
