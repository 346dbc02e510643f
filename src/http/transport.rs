//! Transport dependency surface.
//!
//! The core only needs "send a request, get back a status and a body".
//! Connection handling, TLS, timeouts, retries and pooling are entirely the
//! transport's responsibility; [`ReqwestTransport`] is the default
//! implementation and tests substitute their own.

use async_trait::async_trait;
use thiserror::Error;

use super::request::OutboundRequest;

/// A transport-level failure: the request never produced an HTTP response
/// (connection refused, timeout, DNS failure, ...).
#[derive(Error, Debug, Clone)]
#[error("{0}")]
pub struct TransportError(pub String);

/// The raw HTTP response as seen by the classifier, retained verbatim for
/// diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body text.
    pub body: String,
}

/// Sends one outbound request and returns the raw response.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute the request.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] only for I/O-level failures; any HTTP
    /// response, whatever its status, is returned as `Ok`.
    async fn send(&self, request: &OutboundRequest) -> Result<TransportResponse, TransportError>;
}

/// Default [`Transport`] backed by a shared [`reqwest::Client`].
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with reqwest's default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transport from a pre-configured client, e.g. one with a
    /// timeout or proxy applied.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &OutboundRequest) -> Result<TransportResponse, TransportError> {
        let method = reqwest::Method::from_bytes(request.method.as_bytes())
            .map_err(|e| TransportError(format!("Invalid HTTP method: {}", e)))?;

        let response = self
            .client
            .request(method, &request.url)
            .header(reqwest::header::CONTENT_TYPE, request.content_type)
            .body(request.body.clone())
            .send()
            .await
            .map_err(|e| TransportError(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError(format!("Failed to read response body: {}", e)))?;

        Ok(TransportResponse { status, body })
    }
}
