//! Sync pipeline error types.

use repomirror_cache::CacheError;
use repomirror_metadata::MetadataError;
use repomirror_upstream::UpstreamError;
use thiserror::Error;

/// A failure from one pipeline step, passed through unchanged.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Metadata(#[from] MetadataError),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error(transparent)]
    Cache(#[from] CacheError),
}

impl SyncError {
    /// Whether the store reported a missing `repos` table.
    pub fn is_schema_missing(&self) -> bool {
        matches!(self, SyncError::Metadata(err) if err.is_schema_missing())
    }
}

/// Result type for sync operations.
pub type SyncResult<T> = std::result::Result<T, SyncError>;
