//! Dispatcher and probes against a real HTTP server.

use httpmock::prelude::*;
use saral::api::{Dispatcher, ReqwestTransport, Transport};
use saral::background::{WarmupMonitor, WarmupOutcome};
use saral::domain::error::{GENERIC_SERVER_MESSAGE, INVALID_RESPONSE_MESSAGE, NETWORK_FAILURE_MESSAGE};
use saral::DispatchError;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

fn transport() -> Arc<dyn Transport> {
    Arc::new(ReqwestTransport::new(Duration::from_secs(5), Duration::from_secs(2)).unwrap())
}

fn analysis_body() -> serde_json::Value {
    json!({
        "simplifiedText": "Every person is equal before the law.",
        "keyPoints": ["Equality before law", "Equal protection of the laws"],
        "legalReferences": ["Article 14"],
        "definedTerms": {"State": "The government and its bodies."}
    })
}

#[tokio::test]
async fn general_query_posts_raw_text_as_json() {
    let server = MockServer::start_async().await;
    let simplify = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/simplify")
                .header("content-type", "application/json")
                .json_body(json!({ "text": "  What does equality before law mean?" }));
            then.status(200).json_body(analysis_body());
        })
        .await;

    let dispatcher = Dispatcher::new(server.base_url(), transport());
    let result = dispatcher
        .submit("  What does equality before law mean?")
        .await
        .unwrap();

    simplify.assert_async().await;
    assert_eq!(result.simplified_text, "Every person is equal before the law.");
    assert_eq!(result.legal_references, vec!["Article 14".to_string()]);
    assert_eq!(result.defined_terms.len(), 1);
}

#[tokio::test]
async fn article_reference_becomes_lookup() {
    let server = MockServer::start_async().await;
    let lookup = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/get_article/21A");
            then.status(200).json_body(analysis_body());
        })
        .await;

    let base = format!("{}/", server.base_url());
    let result = Dispatcher::new(base, transport())
        .submit("Article 21A")
        .await
        .unwrap();

    lookup.assert_async().await;
    assert_eq!(result.key_points.len(), 2);
}

#[tokio::test]
async fn preamble_lookup_is_case_insensitive() {
    let server = MockServer::start_async().await;
    let lookup = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/get_article/preamble");
            then.status(200).json_body(analysis_body());
        })
        .await;

    let dispatcher = Dispatcher::new(server.base_url(), transport());
    dispatcher.submit("PREAMBLE").await.unwrap();
    dispatcher.submit("explain the preamble").await.unwrap();

    lookup.assert_calls_async(2).await;
}

#[tokio::test]
async fn server_error_payload_becomes_the_message() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/simplify");
            then.status(500)
                .json_body(json!({ "error": "Failed to process the text with the AI model." }));
        })
        .await;

    let err = Dispatcher::new(server.base_url(), transport())
        .submit("Explain the writ of mandamus")
        .await
        .unwrap_err();

    assert_eq!(
        err,
        DispatchError::Server {
            status: 500,
            message: "Failed to process the text with the AI model.".to_string(),
        }
    );
}

#[tokio::test]
async fn unparseable_error_body_uses_invalid_response_message() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/get_article/999");
            then.status(404).body("<html>Not Found</html>");
        })
        .await;

    let err = Dispatcher::new(server.base_url(), transport())
        .submit("Article 999")
        .await
        .unwrap_err();

    assert_eq!(err.message(), INVALID_RESPONSE_MESSAGE);
}

#[tokio::test]
async fn error_payload_without_message_uses_generic_message() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/simplify");
            then.status(503).json_body(json!({}));
        })
        .await;

    let err = Dispatcher::new(server.base_url(), transport())
        .submit("What is federalism?")
        .await
        .unwrap_err();

    assert_eq!(
        err,
        DispatchError::Server {
            status: 503,
            message: GENERIC_SERVER_MESSAGE.to_string(),
        }
    );
}

#[tokio::test]
async fn success_status_with_error_field_is_a_logical_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/get_article/370");
            then.status(200).json_body(json!({ "error": "Article 370 could not be found." }));
        })
        .await;

    let err = Dispatcher::new(server.base_url(), transport())
        .submit("art 370")
        .await
        .unwrap_err();

    assert_eq!(err, DispatchError::Logical("Article 370 could not be found.".to_string()));
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    let err = Dispatcher::new("http://127.0.0.1:1", transport())
        .submit("What is federalism?")
        .await
        .unwrap_err();

    assert!(matches!(err, DispatchError::Transport { .. }));
    assert_eq!(err.message(), NETWORK_FAILURE_MESSAGE);
}

#[tokio::test]
async fn any_http_answer_counts_as_warm() {
    let server = MockServer::start_async().await;
    let root = server
        .mock_async(|when, then| {
            when.method(GET).path("/");
            then.status(404);
        })
        .await;

    let outcome = WarmupMonitor::new(&server.base_url(), Duration::from_millis(50), transport())
        .spawn()
        .outcome()
        .await;

    root.assert_async().await;
    assert_eq!(outcome, WarmupOutcome::AlreadyWarm);
}

#[tokio::test]
async fn unreachable_backend_stays_asleep_after_one_retry() {
    let outcome = WarmupMonitor::new("http://127.0.0.1:1", Duration::from_millis(50), transport())
        .spawn()
        .outcome()
        .await;

    assert_eq!(outcome, WarmupOutcome::StillAsleep);
}
