//! Upstream client error types.

use thiserror::Error;

/// Upstream fetch errors. None of these are retried.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("upstream request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upstream returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode upstream response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type for upstream operations.
pub type UpstreamResult<T> = std::result::Result<T, UpstreamError>;
