//! Error types for the upstream layer

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while calling the chat-completions API
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The HTTP client could not be constructed
    #[error("Failed to create HTTP client: {0}")]
    ClientBuild(String),

    /// Connection, TLS or request-level failure before a status arrived
    #[error("Request error: {0}")]
    Request(String),

    /// Non-success status from the provider
    #[error("HTTP error (status {status})")]
    HttpError { status: u16, body: String },

    /// No response within the deadline
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Reply body failed after streaming began
    #[error("Stream error: {0}")]
    StreamError(String),
}

impl UpstreamError {
    /// Status code reported by the provider, if the failure carried one
    pub fn status(&self) -> Option<u16> {
        match self {
            UpstreamError::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            UpstreamError::HttpError {
                status: status.as_u16(),
                body: err.to_string(),
            }
        } else if err.is_body() || err.is_decode() {
            UpstreamError::StreamError(err.to_string())
        } else {
            UpstreamError::Request(err.to_string())
        }
    }
}
