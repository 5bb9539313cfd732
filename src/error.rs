//! Triagem error types

use crate::types::NoticeLevel;

/// Message shown to the user when the service answers 2xx with a body that
/// does not satisfy the result contract.
pub const INTERNAL_ERROR_MESSAGE: &str = "internal server error, try again";

/// Triagem error types
#[derive(Debug, thiserror::Error)]
pub enum TriagemError {
    // Input validation errors (never reach the network)
    #[error("no file selected, please choose a TXT or PDF file first")]
    NoFileSelected,

    #[error("unsupported file type '{media_type}', please select a TXT or PDF file")]
    UnsupportedFileType { media_type: String },

    #[error("file is too large ({size} bytes), the maximum is {max} bytes")]
    FileTooLarge { size: u64, max: u64 },

    #[error("please enter the email text")]
    EmptyText,

    #[error("the text must have at least {min} characters for an accurate analysis")]
    TextTooShort { len: usize, min: usize },

    #[error("the text is too long ({len} characters), the maximum is {max}")]
    TextTooLong { len: usize, max: usize },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    // Transport errors
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The service answered 2xx but the body is missing a required field.
    #[error("invalid response from server: {0}")]
    InvalidResponse(String),

    // Local environment errors
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse error taxonomy used to pick how an error is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rejected locally before any network call.
    Validation,
    /// Network failure, non-2xx status or unparsable body.
    Transport,
    /// 2xx response that violates the result contract.
    Contract,
    /// Config, preferences or file system failure on the client side.
    Local,
}

impl TriagemError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NoFileSelected
            | Self::UnsupportedFileType { .. }
            | Self::FileTooLarge { .. }
            | Self::EmptyText
            | Self::TextTooShort { .. }
            | Self::TextTooLong { .. }
            | Self::InvalidInput(_) => ErrorKind::Validation,
            Self::Http(_) | Self::Api { .. } | Self::Json(_) => ErrorKind::Transport,
            Self::InvalidResponse(_) => ErrorKind::Contract,
            Self::Configuration(_) | Self::Io(_) => ErrorKind::Local,
        }
    }

    /// Whether this error was raised before any request was sent.
    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }

    /// Notice level for reporting: warnings for input problems, danger otherwise.
    pub fn level(&self) -> NoticeLevel {
        match self.kind() {
            ErrorKind::Validation => NoticeLevel::Warning,
            _ => NoticeLevel::Danger,
        }
    }

    /// The message shown to the user.
    ///
    /// Server-supplied messages and parser errors pass through verbatim.
    /// Contract violations are replaced by a generic message so the response
    /// shape is not exposed.
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { message, .. } => message.clone(),
            Self::Http(message) => message.clone(),
            Self::Json(e) => e.to_string(),
            Self::InvalidResponse(_) => INTERNAL_ERROR_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }

    /// Short stable label, used as a metrics dimension.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::NoFileSelected => "no_file",
            Self::UnsupportedFileType { .. } => "unsupported_type",
            Self::FileTooLarge { .. } => "file_too_large",
            Self::EmptyText => "empty_text",
            Self::TextTooShort { .. } => "text_too_short",
            Self::TextTooLong { .. } => "text_too_long",
            Self::InvalidInput(_) => "invalid_input",
            Self::Http(_) => "http",
            Self::Api { .. } => "api",
            Self::Json(_) => "json",
            Self::InvalidResponse(_) => "invalid_response",
            Self::Configuration(_) => "configuration",
            Self::Io(_) => "io",
        }
    }
}

/// Result type alias for Triagem operations
pub type Result<T> = std::result::Result<T, TriagemError>;
