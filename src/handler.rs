//! Submission handler: view state in, outcome out.
//!
//! One call to [`SubmissionHandler::submit`] is one submission:
//!
//! 1. The view state is turned into a [`Submission`]. Input problems end the
//!    call here with a warning notice; the control and the network are never
//!    touched.
//! 2. The control enters loading state. A guard returns it to ready state
//!    exactly once when the call settles, including when the future is
//!    dropped mid-flight.
//! 3. The analyzer is awaited and its result mapped to a notice.
//!
//! Nothing is retried and nothing is kept between calls. Overlapping calls are
//! not deduplicated.

use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};

use crate::telemetry;
use crate::traits::{Analyzer, SubmitControl};
use crate::types::{AnalysisResult, InputLimits, InputMode, Notice, ViewState};
use crate::{Result, TriagemError};

/// Notice shown after a successful analysis.
pub const SUCCESS_MESSAGE: &str = "email analysed successfully";

/// Result of one submission.
#[derive(Debug)]
pub struct Outcome {
    /// What to tell the user.
    pub notice: Notice,
    /// The validated result, or the error behind the notice.
    pub result: Result<AnalysisResult>,
}

impl Outcome {
    fn success(result: AnalysisResult) -> Self {
        Self {
            notice: Notice::success(SUCCESS_MESSAGE),
            result: Ok(result),
        }
    }

    fn failure(err: TriagemError) -> Self {
        Self {
            notice: Notice::from(&err),
            result: Err(err),
        }
    }

    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    /// The validated result, if the submission succeeded.
    pub fn analysis(&self) -> Option<&AnalysisResult> {
        self.result.as_ref().ok()
    }

    pub fn error(&self) -> Option<&TriagemError> {
        self.result.as_ref().err()
    }
}

/// Turns view state into requests and responses into outcomes.
#[derive(Clone)]
pub struct SubmissionHandler {
    analyzer: Arc<dyn Analyzer>,
    limits: InputLimits,
}

impl SubmissionHandler {
    pub fn new(analyzer: Arc<dyn Analyzer>) -> Self {
        Self::with_limits(analyzer, InputLimits::default())
    }

    pub fn with_limits(analyzer: Arc<dyn Analyzer>, limits: InputLimits) -> Self {
        Self { analyzer, limits }
    }

    pub fn limits(&self) -> &InputLimits {
        &self.limits
    }

    /// Submit the active input of `view`.
    pub async fn submit(&self, view: &ViewState, control: &dyn SubmitControl) -> Outcome {
        let submission = match view.submission(&self.limits) {
            Ok(submission) => submission,
            Err(err) => {
                warn!(mode = %view.active, reason = err.reason(), "submission rejected");
                metrics::counter!(telemetry::REJECTIONS_TOTAL, "reason" => err.reason())
                    .increment(1);
                return Outcome::failure(err);
            }
        };

        let mode = submission.mode();
        let _loading = LoadingGuard::engage(control);
        let start = Instant::now();

        let result = self.analyzer.analyze(&submission).await;
        Self::record_request(mode, start, result.is_ok());

        match result {
            Ok(analysis) => {
                info!(
                    analyzer = self.analyzer.name(),
                    %mode,
                    classification = %analysis.classification,
                    confidence = analysis.confidence,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "email analysed"
                );
                Outcome::success(analysis)
            }
            Err(err) => {
                warn!(
                    analyzer = self.analyzer.name(),
                    %mode,
                    error = %err,
                    "analysis failed"
                );
                Outcome::failure(err)
            }
        }
    }

    /// Record request outcome metrics (counter + histogram).
    fn record_request(mode: InputMode, start: Instant, ok: bool) {
        let status = if ok { "ok" } else { "error" };
        metrics::counter!(telemetry::REQUESTS_TOTAL,
            "mode" => mode.as_str(),
            "status" => status,
        )
        .increment(1);
        metrics::histogram!(telemetry::REQUEST_DURATION_SECONDS,
            "mode" => mode.as_str(),
        )
        .record(start.elapsed().as_secs_f64());
    }
}

/// Holds a control in loading state; releases it on drop.
struct LoadingGuard<'a> {
    control: &'a dyn SubmitControl,
}

impl<'a> LoadingGuard<'a> {
    fn engage(control: &'a dyn SubmitControl) -> Self {
        control.set_loading(true);
        Self { control }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.control.set_loading(false);
    }
}
