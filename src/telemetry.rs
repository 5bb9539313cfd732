//! Telemetry metric name constants.
//!
//! Consumers install their own `metrics` recorder (e.g. prometheus, statsd);
//! without a recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `triagem_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).
//!
//! # Common labels
//!
//! - `mode` — input mode: "file" or "text"
//! - `status` — outcome: "ok" or "error"
//! - `reason` — short error label (see `TriagemError::reason`)

/// Submissions that reached the network.
///
/// Labels: `mode`, `status` ("ok" | "error").
pub const REQUESTS_TOTAL: &str = "triagem_requests_total";

/// Request duration in seconds.
///
/// Labels: `mode`.
pub const REQUEST_DURATION_SECONDS: &str = "triagem_request_duration_seconds";

/// Submissions rejected locally, before any request was sent.
///
/// Labels: `reason`.
pub const REJECTIONS_TOTAL: &str = "triagem_rejections_total";
