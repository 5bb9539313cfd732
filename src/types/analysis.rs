//! Analysis result returned by the classification service.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Result, TriagemError};

/// Label the service uses for emails that need action.
pub const PRODUCTIVE_LABEL: &str = "Produtivo";

/// Label the service uses for emails that need no action.
pub const UNPRODUCTIVE_LABEL: &str = "Improdutivo";

/// Validated result of one `POST /analyze` exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Predicted label, e.g. `"Produtivo"`.
    pub classification: String,
    /// Confidence score, nominally 0–100. Not range-checked.
    pub confidence: f64,
    /// Suggested reply.
    pub response: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_length: Option<u64>,
    /// ISO-8601 timestamp of the analysis, as sent by the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis_timestamp: Option<String>,
    /// Preprocessed excerpt of the analysed text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processed_text: Option<String>,
}

/// Coarse category derived from the classification label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Productive,
    Unproductive,
}

impl AnalysisResult {
    /// Validate a parsed response body.
    ///
    /// `classification`, `confidence` and `response` must all be present and
    /// truthy: non-empty strings and a non-zero finite number. Anything else
    /// is a contract violation, even though the transport succeeded.
    pub fn from_json(body: Value) -> Result<Self> {
        let Value::Object(map) = body else {
            return Err(TriagemError::InvalidResponse(
                "response body is not a JSON object".to_string(),
            ));
        };

        let classification = required_str(&map, "classification")?;
        let confidence = map
            .get("confidence")
            .and_then(Value::as_f64)
            .filter(|c| c.is_finite() && *c != 0.0)
            .ok_or_else(|| missing("confidence"))?;
        let response = required_str(&map, "response")?;

        Ok(Self {
            classification,
            confidence,
            response,
            text_length: map.get("text_length").and_then(Value::as_u64),
            analysis_timestamp: optional_str(&map, "analysis_timestamp"),
            processed_text: optional_str(&map, "processed_text"),
        })
    }

    pub fn category(&self) -> Category {
        if self.classification == PRODUCTIVE_LABEL {
            Category::Productive
        } else {
            Category::Unproductive
        }
    }

    pub fn is_productive(&self) -> bool {
        self.category() == Category::Productive
    }

    /// Confidence formatted for display, e.g. `92%` or `87.5%`.
    pub fn confidence_label(&self) -> String {
        format!("{}%", self.confidence)
    }
}

fn required_str(map: &serde_json::Map<String, Value>, field: &str) -> Result<String> {
    map.get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| missing(field))
}

fn optional_str(map: &serde_json::Map<String, Value>, field: &str) -> Option<String> {
    map.get(field).and_then(Value::as_str).map(str::to_string)
}

fn missing(field: &str) -> TriagemError {
    TriagemError::InvalidResponse(format!("missing or empty field '{field}'"))
}

/// Error body sent by the service on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: Option<String>,
}
