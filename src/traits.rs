//! Seams between the submission handler, the network and the presentation.
//!
//! The handler only talks to an [`Analyzer`] and a [`SubmitControl`], so the
//! success and failure branches can be exercised without a real service or a
//! terminal.

use async_trait::async_trait;

use crate::Result;
use crate::types::{AnalysisResult, Submission};

/// Sends one submission to the classification service.
///
/// Implementations return a validated [`AnalysisResult`] or an error whose
/// [`kind`](crate::TriagemError::kind) tells validation, transport and
/// contract failures apart.
#[async_trait]
pub trait Analyzer: Send + Sync {
    /// Analyzer name for logging/debugging.
    fn name(&self) -> &str;

    async fn analyze(&self, submission: &Submission) -> Result<AnalysisResult>;
}

/// The control that triggers a submission (a button, a spinner, ...).
///
/// It is put into loading state while a request is in flight and returned to
/// ready state when the request settles.
pub trait SubmitControl: Send + Sync {
    fn set_loading(&self, loading: bool);
}

/// A control with no visible state.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopControl;

impl SubmitControl for NoopControl {
    fn set_loading(&self, _loading: bool) {}
}
