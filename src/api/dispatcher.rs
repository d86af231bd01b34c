//! Request dispatch and response normalization.
//!
//! [`Dispatcher::submit`] turns user input into exactly one backend call and
//! folds every outcome into `Result<AnalysisResult, DispatchError>`:
//!
//! ```text
//! blank input ─────────────────────────────────────► Validation
//! classify → execute ── no response ───────────────► Transport
//!                     └ non-2xx ── {error} / junk ─► Server
//!                     └ 2xx ────── {error: "..."} ─► Logical
//!                                └ AnalysisResult ─► Ok
//! ```
//!
//! The dispatcher owns no session state; the caller applies the outcome. It
//! does not enforce single-flight either; the session's `Loading` guard does.

use super::classifier;
use super::transport::{HttpResponse, Transport};
use crate::domain::error::{GENERIC_SERVER_MESSAGE, INVALID_RESPONSE_MESSAGE};
use crate::domain::{AnalysisResult, DispatchError};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use tracing::Instrument;

/// Executes analysis requests against one backend.
#[derive(Clone)]
pub struct Dispatcher {
    base_url: String,
    transport: Arc<dyn Transport>,
}

impl Dispatcher {
    pub fn new(base_url: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        Self {
            base_url: base_url.into(),
            transport,
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Submits `text` for analysis.
    ///
    /// # Errors
    ///
    /// - [`DispatchError::Validation`] when `text` is blank; no request is made.
    /// - [`DispatchError::Transport`] when no response arrives.
    /// - [`DispatchError::Server`] for non-2xx statuses and uninterpretable bodies.
    /// - [`DispatchError::Logical`] when a 2xx payload carries an `error` field.
    pub async fn submit(&self, text: &str) -> Result<AnalysisResult, DispatchError> {
        if text.trim().is_empty() {
            tracing::debug!("rejecting blank input");
            return Err(DispatchError::Validation);
        }

        let request = classifier::classify(&self.base_url, text);
        let span = tracing::debug_span!("dispatch",
            method = %request.method(),
            url = %request.url(),
            text_len = text.len()
        );

        async move {
            let response = self.transport.execute(&request).await.map_err(|e| {
                tracing::debug!(error = %e, "transport failure");
                DispatchError::Transport { cause: e.0 }
            })?;

            let outcome = interpret(&response);
            match &outcome {
                Ok(_) => tracing::debug!(status = response.status, "analysis received"),
                Err(e) => tracing::debug!(status = response.status, error = %e, "analysis failed"),
            }
            outcome
        }
        .instrument(span)
        .await
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// Maps a received response onto the dispatch outcome.
fn interpret(response: &HttpResponse) -> Result<AnalysisResult, DispatchError> {
    let invalid = || DispatchError::Server {
        status: response.status,
        message: INVALID_RESPONSE_MESSAGE.to_string(),
    };

    if !response.is_success() {
        let payload: JsonValue = serde_json::from_str(&response.body).map_err(|_| invalid())?;
        let message = error_message(&payload).unwrap_or_else(|| GENERIC_SERVER_MESSAGE.to_string());
        return Err(DispatchError::Server {
            status: response.status,
            message,
        });
    }

    let payload: JsonValue = serde_json::from_str(&response.body).map_err(|_| invalid())?;
    if let Some(message) = error_message(&payload) {
        return Err(DispatchError::Logical(message));
    }

    serde_json::from_value(payload).map_err(|_| invalid())
}

/// Returns the message of a truthy `error` field, if any.
///
/// `null`, `false`, `0` and `""` are falsy. Strings are used as-is; any other
/// truthy value is shown as its JSON text.
fn error_message(payload: &JsonValue) -> Option<String> {
    match payload.get("error")? {
        JsonValue::Null | JsonValue::Bool(false) => None,
        JsonValue::Number(n) if n.as_f64() == Some(0.0) => None,
        JsonValue::String(s) if s.is_empty() => None,
        JsonValue::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::transport::TransportError;
    use crate::domain::error::{EMPTY_INPUT_MESSAGE, NETWORK_FAILURE_MESSAGE};
    use crate::domain::{HttpMethod, RequestDescriptor};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Replies with a canned outcome and records every request it sees.
    struct CannedTransport {
        reply: Result<HttpResponse, TransportError>,
        seen: Mutex<Vec<RequestDescriptor>>,
    }

    impl CannedTransport {
        fn new(reply: Result<HttpResponse, TransportError>) -> Arc<Self> {
            Arc::new(Self {
                reply,
                seen: Mutex::new(Vec::new()),
            })
        }

        fn respond(status: u16, body: &str) -> Arc<Self> {
            Self::new(Ok(HttpResponse {
                status,
                body: body.to_string(),
            }))
        }

        fn seen(&self) -> Vec<RequestDescriptor> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for CannedTransport {
        async fn execute(
            &self,
            request: &RequestDescriptor,
        ) -> Result<HttpResponse, TransportError> {
            self.seen.lock().unwrap().push(request.clone());
            self.reply.clone()
        }

        async fn probe(&self, _url: &str) -> Result<(), TransportError> {
            Ok(())
        }
    }

    fn dispatcher(transport: &Arc<CannedTransport>) -> Dispatcher {
        Dispatcher::new("http://backend.test", Arc::clone(transport) as Arc<dyn Transport>)
    }

    #[tokio::test]
    async fn blank_input_never_reaches_the_network() {
        let transport = CannedTransport::respond(200, "{}");
        let dispatcher = dispatcher(&transport);

        for text in ["", "   ", "\n\t "] {
            let error = dispatcher.submit(text).await.unwrap_err();
            assert_eq!(error, DispatchError::Validation);
            assert_eq!(error.message(), EMPTY_INPUT_MESSAGE);
        }
        assert!(transport.seen().is_empty());
    }

    #[tokio::test]
    async fn success_payload_round_trips() {
        let body = serde_json::json!({
            "simplifiedText": "Life and liberty cannot be taken away except by law.",
            "keyPoints": ["Applies to everyone", "Procedure must be fair"],
            "legalReferences": ["Article 21", "Maneka Gandhi v. Union of India"],
            "definedTerms": {"personal liberty": "Freedom of the individual.", "procedure": "The legal process."}
        });
        let transport = CannedTransport::respond(200, &body.to_string());

        let result = dispatcher(&transport).submit("Article 21").await.unwrap();

        assert_eq!(result, serde_json::from_value::<AnalysisResult>(body).unwrap());
        assert_eq!(result.key_points, vec!["Applies to everyone", "Procedure must be fair"]);
        assert_eq!(result.legal_references[1], "Maneka Gandhi v. Union of India");
        assert_eq!(result.defined_terms.len(), 2);

        let seen = transport.seen();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].method(), HttpMethod::Get);
        assert_eq!(seen[0].url(), "http://backend.test/api/get_article/21");
    }

    #[tokio::test]
    async fn transport_failure_maps_to_generic_message() {
        let transport = CannedTransport::new(Err(TransportError("connection refused".into())));

        let error = dispatcher(&transport).submit("Explain the lease").await.unwrap_err();

        assert!(matches!(error, DispatchError::Transport { ref cause } if cause == "connection refused"));
        assert_eq!(error.message(), NETWORK_FAILURE_MESSAGE);
    }

    #[tokio::test]
    async fn server_error_uses_payload_message() {
        let transport = CannedTransport::respond(400, r#"{"error": "No text provided in the request"}"#);

        let error = dispatcher(&transport).submit("some text").await.unwrap_err();

        assert_eq!(
            error,
            DispatchError::Server {
                status: 400,
                message: "No text provided in the request".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn server_error_with_unparseable_body_uses_fallback() {
        let transport = CannedTransport::respond(502, "<html>Bad Gateway</html>");

        let error = dispatcher(&transport).submit("some text").await.unwrap_err();

        assert_eq!(error.message(), INVALID_RESPONSE_MESSAGE);
    }

    #[tokio::test]
    async fn server_error_without_message_uses_generic_text() {
        let transport = CannedTransport::respond(500, "{}");

        let error = dispatcher(&transport).submit("some text").await.unwrap_err();

        assert_eq!(error.message(), GENERIC_SERVER_MESSAGE);
    }

    #[tokio::test]
    async fn successful_status_with_error_field_is_a_logical_failure() {
        let transport =
            CannedTransport::respond(200, r#"{"error": "Failed to process the text with the AI model."}"#);

        let error = dispatcher(&transport).submit("some text").await.unwrap_err();

        assert_eq!(
            error,
            DispatchError::Logical("Failed to process the text with the AI model.".to_string())
        );
    }

    #[test]
    fn falsy_error_fields_are_not_failures() {
        for body in [
            r#"{"error": null, "simplifiedText": "ok"}"#,
            r#"{"error": "", "simplifiedText": "ok"}"#,
            r#"{"error": false, "simplifiedText": "ok"}"#,
            r#"{"error": 0, "simplifiedText": "ok"}"#,
            r#"{"error": 0.0, "simplifiedText": "ok"}"#,
        ] {
            let response = HttpResponse {
                status: 200,
                body: body.to_string(),
            };
            assert_eq!(interpret(&response).unwrap().simplified_text, "ok", "{body}");
        }
    }

    #[test]
    fn successful_status_with_non_json_body_is_invalid() {
        let response = HttpResponse {
            status: 200,
            body: "not json".to_string(),
        };
        assert_eq!(interpret(&response).unwrap_err().message(), INVALID_RESPONSE_MESSAGE);
    }

    #[test]
    fn server_error_with_structured_payload_shows_its_value() {
        let response = HttpResponse {
            status: 422,
            body: r#"{"error": {"field": "text"}}"#.to_string(),
        };
        assert_eq!(
            interpret(&response).unwrap_err(),
            DispatchError::Server {
                status: 422,
                message: r#"{"field":"text"}"#.to_string(),
            }
        );
    }

    #[test]
    fn server_error_with_falsy_or_non_object_payload_uses_generic_text() {
        for body in [r#"{"error": 0}"#, r#"{"error": ""}"#, r#"["boom"]"#, "null"] {
            let response = HttpResponse {
                status: 500,
                body: body.to_string(),
            };
            assert_eq!(interpret(&response).unwrap_err().message(), GENERIC_SERVER_MESSAGE, "{body}");
        }
    }
}
