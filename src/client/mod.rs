//! Client library for the classification service.
//!
//! Provides [`AnalyzeClient`], which implements [`Analyzer`](crate::Analyzer)
//! by sending submissions to a remote service over HTTP.

mod analyze_client;

pub use analyze_client::{AnalyzeClient, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
