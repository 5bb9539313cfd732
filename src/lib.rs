//! Triagem - client for an email triage service
//!
//! Submits an email, as pasted text or as an uploaded `.txt`/`.pdf` file, to a
//! classification service's `POST /analyze` endpoint and returns the predicted
//! category, a confidence score and a suggested reply.
//!
//! The [`SubmissionHandler`] is the entry point: it validates an explicit
//! [`ViewState`] locally, sends one request through an [`Analyzer`] and maps
//! the reply onto an [`Outcome`] with a user-facing [`Notice`].
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use triagem::{AnalyzeClient, NoopControl, SubmissionHandler, ViewState};
//!
//! #[tokio::main]
//! async fn main() -> triagem::Result<()> {
//!     let client = AnalyzeClient::new("http://127.0.0.1:5000")?;
//!     let handler = SubmissionHandler::new(Arc::new(client));
//!
//!     let view = ViewState::with_text("Preciso de suporte para acessar minha conta.");
//!     let outcome = handler.submit(&view, &NoopControl).await;
//!
//!     println!("{}", outcome.notice.message);
//!     if let Some(result) = outcome.analysis() {
//!         println!("{} ({})", result.classification, result.confidence_label());
//!         println!("{}", result.response);
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod handler;
pub mod prefs;
pub mod render;
pub mod telemetry;
pub mod traits;
pub mod types;
mod version;

// Re-export main types at crate root
pub use client::AnalyzeClient;
pub use config::Config;
pub use error::{ErrorKind, Result, TriagemError};
pub use handler::{Outcome, SubmissionHandler};
pub use prefs::Preferences;
pub use traits::{Analyzer, NoopControl, SubmitControl};
pub use version::{BUILD_TIMESTAMP, GIT_BRANCH, GIT_SHA, PKG_VERSION, version_string};

pub use types::{
    AnalysisResult, Category, EmailFile, InputLimits, InputMode, Notice, NoticeLevel, Submission,
    ViewState,
};
