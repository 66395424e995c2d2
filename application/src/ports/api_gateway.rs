//! API Gateway port
//!
//! Defines the interface for authenticated requests to the dashboard backend.
//!
//! Every method returns `Ok(None)` when the backend rejected the request as
//! unauthorized. By then the gateway has already cleared the stored
//! credential and navigated to the login page, so callers must stop
//! processing and must not treat `None` as an error to report.

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use serde_json::Value;
use std::pin::Pin;
use thiserror::Error;

/// Errors that can occur during gateway operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Unexpected status {status} from {path}")]
    Status { status: u16, path: String },

    #[error("Failed to decode response from {path}: {message}")]
    Decode { path: String, message: String },

    #[error("Stream read error: {0}")]
    StreamRead(String),
}

impl GatewayError {
    /// Whether the request never produced a response.
    pub fn is_transport(&self) -> bool {
        matches!(self, GatewayError::Transport(_))
    }
}

/// Incrementally delivered response body.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, GatewayError>> + Send>>;

/// An open streaming response.
pub struct StreamResponse {
    pub status: u16,
    pub body: ByteStream,
}

impl StreamResponse {
    pub fn new(status: u16, body: ByteStream) -> Self {
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

impl std::fmt::Debug for StreamResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamResponse")
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

/// Gateway for backend communication
///
/// This port defines how the application layer talks to the dashboard
/// backend. Implementations attach the stored bearer token to `get_json` and
/// `post_stream` requests and handle their 401 responses by forcing
/// re-authentication.
#[async_trait]
pub trait ApiGateway: Send + Sync {
    /// GET a JSON document. Non-success statuses are errors.
    async fn get_json(&self, path: &str) -> Result<Option<Value>, GatewayError>;

    /// POST a JSON body and return the response body as a byte stream.
    ///
    /// The status is not checked; callers decide what a non-success means.
    async fn post_stream(
        &self,
        path: &str,
        body: Value,
    ) -> Result<Option<StreamResponse>, GatewayError>;

    /// POST url-encoded form fields and decode the JSON response.
    ///
    /// Sent without the stored credential. A 401 returns `Ok(None)` and
    /// leaves the stored session untouched.
    async fn post_form(
        &self,
        path: &str,
        fields: &[(&str, &str)],
    ) -> Result<Option<Value>, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;

    #[test]
    fn test_stream_response_success_range() {
        let empty = || -> ByteStream { Box::pin(stream::empty()) };
        assert!(StreamResponse::new(200, empty()).is_success());
        assert!(StreamResponse::new(204, empty()).is_success());
        assert!(!StreamResponse::new(302, empty()).is_success());
        assert!(!StreamResponse::new(500, empty()).is_success());
    }

    #[test]
    fn test_error_display() {
        let err = GatewayError::Status {
            status: 503,
            path: "/reports/summary".into(),
        };
        assert_eq!(err.to_string(), "Unexpected status 503 from /reports/summary");
        assert!(GatewayError::Transport("refused".into()).is_transport());
        assert!(!err.is_transport());
    }
}
