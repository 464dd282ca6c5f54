//! Cache error types.

use thiserror::Error;

/// Cache operation errors.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("cache returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The cache accepted the request but rejected the command.
    #[error("cache command failed: {0}")]
    Command(String),

    #[error("unexpected cache reply: {0}")]
    UnexpectedReply(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = std::result::Result<T, CacheError>;
