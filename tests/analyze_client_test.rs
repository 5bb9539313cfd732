//! Wiremock integration tests for AnalyzeClient.
//!
//! These tests verify request construction and response mapping against a
//! mocked `/analyze` endpoint.

use triagem::{AnalyzeClient, Analyzer, EmailFile, ErrorKind, Submission, TriagemError};
use wiremock::matchers::{body_json, body_string_contains, header, header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn success_body() -> serde_json::Value {
    serde_json::json!({
        "classification": "Produtivo",
        "confidence": 92,
        "response": "Obrigado..."
    })
}

/// Text is sent as trimmed JSON.
#[tokio::test]
async fn test_analyze_text_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/analyze"))
        .and(header("content-type", "application/json"))
        .and(body_json(serde_json::json!({
            "text": "Preciso de suporte técnico urgente"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = AnalyzeClient::new(mock_server.uri()).unwrap();
    let result = client
        .analyze_text("Preciso de suporte técnico urgente")
        .await
        .expect("analyze should succeed");

    assert_eq!(result.classification, "Produtivo");
    assert_eq!(result.confidence, 92.0);
    assert_eq!(result.response, "Obrigado...");
    assert!(result.text_length.is_none());
    assert!(result.analysis_timestamp.is_none());
}

/// Files are sent as multipart form data under the `file` field.
#[tokio::test]
async fn test_analyze_file_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/analyze"))
        .and(header_regex("content-type", "^multipart/form-data; boundary="))
        .and(body_string_contains("name=\"file\"; filename=\"email.txt\""))
        .and(body_string_contains("text/plain"))
        .and(body_string_contains("Feliz aniversário!"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "classification": "Improdutivo",
            "confidence": 95.0,
            "response": "Muito obrigado pela sua mensagem!",
            "text_length": 18,
            "analysis_timestamp": "2024-05-01T10:15:00.123456"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = AnalyzeClient::new(mock_server.uri()).unwrap();
    let file = EmailFile::new("email.txt", "text/plain", "Feliz aniversário!".as_bytes());
    let result = client
        .analyze(&Submission::File(file))
        .await
        .expect("analyze should succeed");

    assert_eq!(result.classification, "Improdutivo");
    assert!(!result.is_productive());
    assert_eq!(result.text_length, Some(18));
    assert_eq!(
        result.analysis_timestamp.as_deref(),
        Some("2024-05-01T10:15:00.123456")
    );
}

/// 2xx without a required field is a contract violation with a generic message.
#[tokio::test]
async fn test_missing_response_field() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/analyze"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "classification": "Produtivo",
            "confidence": 92
        })))
        .mount(&mock_server)
        .await;

    let client = AnalyzeClient::new(mock_server.uri()).unwrap();
    let err = client.analyze_text("texto qualquer aqui").await.unwrap_err();

    assert!(matches!(err, TriagemError::InvalidResponse(_)));
    assert_eq!(err.kind(), ErrorKind::Contract);
    assert_eq!(err.user_message(), "internal server error, try again");
    assert!(!err.user_message().contains("response"));
}

/// Server-supplied error text is reported verbatim.
#[tokio::test]
async fn test_server_error_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/analyze"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(serde_json::json!({ "error": "model unavailable" })),
        )
        .mount(&mock_server)
        .await;

    let client = AnalyzeClient::new(mock_server.uri()).unwrap();
    let err = client.analyze_text("texto qualquer aqui").await.unwrap_err();

    match &err {
        TriagemError::Api { status, message } => {
            assert_eq!(*status, 500);
            assert_eq!(message, "model unavailable");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
    assert_eq!(err.user_message(), "model unavailable");
}

/// An unparsable error body falls back to the status code.
#[tokio::test]
async fn test_server_error_unparsable_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/analyze"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let client = AnalyzeClient::new(mock_server.uri()).unwrap();
    let err = client.analyze_text("texto qualquer aqui").await.unwrap_err();

    assert_eq!(err.user_message(), "HTTP error 500");
    assert_eq!(err.kind(), ErrorKind::Transport);
}

/// An empty `error` string is not a message; the status code is used instead.
#[tokio::test]
async fn test_server_error_empty_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/analyze"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({ "error": "" })))
        .mount(&mock_server)
        .await;

    let client = AnalyzeClient::new(mock_server.uri()).unwrap();
    let err = client.analyze_text("texto qualquer aqui").await.unwrap_err();

    assert!(matches!(err, TriagemError::Api { status: 500, .. }));
    assert_eq!(err.user_message(), "HTTP error 500");
}

/// A 400 from the service carries its validation message.
#[tokio::test]
async fn test_bad_request_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/analyze"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": "Formato de arquivo não suportado. Use apenas .txt ou .pdf"
        })))
        .mount(&mock_server)
        .await;

    let client = AnalyzeClient::new(mock_server.uri()).unwrap();
    let file = EmailFile::new("email.pdf", "application/pdf", vec![0x25, 0x50, 0x44, 0x46]);
    let err = client.analyze_file(&file).await.unwrap_err();

    assert_eq!(
        err.user_message(),
        "Formato de arquivo não suportado. Use apenas .txt ou .pdf"
    );
}

/// Malformed JSON on a 2xx surfaces the parser's message.
#[tokio::test]
async fn test_malformed_success_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/analyze"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .mount(&mock_server)
        .await;

    let client = AnalyzeClient::new(mock_server.uri()).unwrap();
    let err = client.analyze_text("texto qualquer aqui").await.unwrap_err();

    assert!(matches!(err, TriagemError::Json(_)));
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_ne!(err.user_message(), "internal server error, try again");
    assert!(!err.user_message().starts_with("JSON error"));
    assert!(err.user_message().contains("line 1"));
}

/// Connection failures map to `Http`.
#[tokio::test]
async fn test_connection_refused() {
    // Bind and drop a listener so the port is closed.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let uri = format!("http://127.0.0.1:{port}");

    let client = AnalyzeClient::new(uri).unwrap();
    let err = client.analyze_text("texto qualquer aqui").await.unwrap_err();

    assert!(matches!(err, TriagemError::Http(_)));
    assert!(!err.user_message().is_empty());
}
