//! HTTP transport seam between the client logic and the network.
//!
//! Every component that talks to the backend (dispatcher, warm-up monitor,
//! availability poller) goes through [`Transport`], so tests can substitute a
//! scripted implementation. [`ReqwestTransport`] is the production
//! implementation.

use crate::domain::{HttpMethod, RequestDescriptor};
use crate::Config;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use thiserror::Error;
use tracing::Instrument;

/// A response that made it back from the server, whatever its status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// No response could be obtained (connection refused, DNS failure, timeout,
/// truncated body).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Network access used by the client.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs the described call and returns the raw response.
    ///
    /// Sends `Content-Type: application/json` when the descriptor carries a body.
    async fn execute(&self, request: &RequestDescriptor) -> Result<HttpResponse, TransportError>;

    /// Opaque liveness probe: succeeds when any HTTP response arrives, without
    /// looking at status or body.
    async fn probe(&self, url: &str) -> Result<(), TransportError>;

    /// Best-effort request whose only purpose is to make a sleeping host start.
    /// The outcome is never observed.
    async fn wake(&self, url: &str) {
        if let Err(e) = self.probe(url).await {
            tracing::trace!(url = %url, error = %e, "wake-up request failed");
        }
    }
}

/// [`Transport`] backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    probe_timeout: Duration,
}

impl ReqwestTransport {
    /// Creates a transport whose analysis calls time out after
    /// `request_timeout` and whose probes time out after `probe_timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialised.
    pub fn new(request_timeout: Duration, probe_timeout: Duration) -> crate::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .user_agent(concat!("saral/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            probe_timeout,
        })
    }

    /// Creates a transport with the timeouts from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialised.
    pub fn from_config(config: &Config) -> crate::Result<Self> {
        Self::new(config.request_timeout(), config.probe_timeout())
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: &RequestDescriptor) -> Result<HttpResponse, TransportError> {
        let span = tracing::debug_span!("http_execute",
            method = %request.method(),
            url = %request.url()
        );

        let mut builder = match request.method() {
            HttpMethod::Get => self.client.get(request.url()),
            HttpMethod::Post => self.client.post(request.url()),
        };
        if let Some(body) = request.body() {
            builder = builder
                .header(CONTENT_TYPE, "application/json")
                .body(body.to_owned());
        }

        async move {
            let response = builder
                .send()
                .await
                .map_err(|e| TransportError(e.to_string()))?;
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .map_err(|e| TransportError(e.to_string()))?;

            tracing::debug!(status = status, body_len = body.len(), "response received");
            Ok(HttpResponse { status, body })
        }
        .instrument(span)
        .await
    }

    async fn probe(&self, url: &str) -> Result<(), TransportError> {
        self.client
            .get(url)
            .timeout(self.probe_timeout)
            .send()
            .await
            .map(|response| {
                tracing::trace!(url = %url, status = response.status().as_u16(), "probe answered");
            })
            .map_err(|e| TransportError(e.to_string()))
    }
}
