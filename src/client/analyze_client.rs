//! HTTP client for the classification service's `POST /analyze` endpoint.
//!
//! Text is sent as `{"text": ...}` JSON; files are sent as multipart form data
//! under the `file` field. Both go to the same endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::traits::Analyzer;
use crate::types::{AnalysisResult, EmailFile, ErrorBody, Submission};
use crate::{Result, TriagemError};

/// Default service URL (the service's development server).
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Client for the `/analyze` endpoint.
#[derive(Clone)]
pub struct AnalyzeClient {
    http: Client,
    base_url: String,
}

impl AnalyzeClient {
    /// Create a client for the given base URL with the default timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a client with a custom request timeout.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TriagemError::Configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self::with_http_client(http, base_url))
    }

    /// Create a client around an existing `reqwest::Client`.
    pub fn with_http_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self) -> String {
        format!("{}/analyze", self.base_url)
    }

    /// Analyse pasted text. The text is sent as given.
    #[instrument(skip(self, text), fields(chars = text.chars().count()))]
    pub async fn analyze_text(&self, text: &str) -> Result<AnalysisResult> {
        let response = self
            .http
            .post(self.endpoint())
            .json(&TextRequest { text })
            .send()
            .await
            .map_err(|e| TriagemError::Http(e.to_string()))?;

        Self::read_result(response).await
    }

    /// Analyse an uploaded file.
    #[instrument(skip(self, file), fields(name = %file.name, media_type = %file.media_type))]
    pub async fn analyze_file(&self, file: &EmailFile) -> Result<AnalysisResult> {
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(&file.media_type)
            .map_err(|e| TriagemError::InvalidInput(format!("invalid media type: {e}")))?;
        let form = Form::new().part("file", part);

        let response = self
            .http
            .post(self.endpoint())
            .multipart(form)
            .send()
            .await
            .map_err(|e| TriagemError::Http(e.to_string()))?;

        Self::read_result(response).await
    }

    /// Map a response onto a validated result or the most specific error.
    async fn read_result(response: reqwest::Response) -> Result<AnalysisResult> {
        let status = response.status();
        debug!(status = status.as_u16(), "analyze response received");

        if !status.is_success() {
            let body = response.bytes().await.ok();
            return Err(api_error(status, body.as_deref()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| TriagemError::Http(e.to_string()))?;
        let value: Value = serde_json::from_slice(&body)?;
        AnalysisResult::from_json(value)
    }
}

/// Build the error for a non-2xx response.
///
/// Uses the body's `error` string when it is non-empty, else a generic message
/// naming the status code.
fn api_error(status: StatusCode, body: Option<&[u8]>) -> TriagemError {
    let message = body
        .and_then(|b| serde_json::from_slice::<ErrorBody>(b).ok())
        .and_then(|b| b.error)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("HTTP error {}", status.as_u16()));

    TriagemError::Api {
        status: status.as_u16(),
        message,
    }
}

#[derive(Serialize)]
struct TextRequest<'a> {
    text: &'a str,
}

#[async_trait]
impl Analyzer for AnalyzeClient {
    fn name(&self) -> &str {
        "http"
    }

    async fn analyze(&self, submission: &Submission) -> Result<AnalysisResult> {
        match submission {
            Submission::Text(text) => self.analyze_text(text).await,
            Submission::File(file) => self.analyze_file(file).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(err: TriagemError) -> String {
        err.user_message()
    }

    #[test]
    fn error_field_is_used_verbatim() {
        let err = api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            Some(br#"{"error":"model unavailable"}"#.as_slice()),
        );
        assert_eq!(message(err), "model unavailable");
    }

    #[test]
    fn unparsable_body_falls_back_to_status() {
        let err = api_error(StatusCode::INTERNAL_SERVER_ERROR, Some(b"<html>oops</html>".as_slice()));
        assert_eq!(message(err), "HTTP error 500");
    }

    #[test]
    fn missing_error_field_falls_back_to_status() {
        let err = api_error(StatusCode::BAD_REQUEST, Some(br#"{"detail":"nope"}"#.as_slice()));
        assert_eq!(message(err), "HTTP error 400");
    }

    #[test]
    fn non_string_error_field_falls_back_to_status() {
        let err = api_error(StatusCode::BAD_GATEWAY, Some(br#"{"error":42}"#.as_slice()));
        assert_eq!(message(err), "HTTP error 502");
    }

    #[test]
    fn empty_error_field_falls_back_to_status() {
        let err = api_error(StatusCode::INTERNAL_SERVER_ERROR, Some(br#"{"error":""}"#.as_slice()));
        assert_eq!(message(err), "HTTP error 500");
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let client = AnalyzeClient::new("http://localhost:5000/").unwrap();
        assert_eq!(client.endpoint(), "http://localhost:5000/analyze");
    }
}
