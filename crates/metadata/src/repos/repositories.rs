//! Mirrored repository table operations.

use crate::error::MetadataResult;
use async_trait::async_trait;
use repomirror_core::Repository;

/// Operations on the `repos` table.
///
/// Every data operation fails with `MetadataError::SchemaMissing` until
/// `ensure_schema` has run.
#[async_trait]
pub trait RepositoryRepo: Send + Sync {
    /// Create the table if it does not exist. Idempotent.
    async fn ensure_schema(&self) -> MetadataResult<()>;

    /// Bulk insert, returning the display projection of the inserted rows ordered by id.
    async fn insert_all(&self, repos: &[Repository]) -> MetadataResult<Vec<Repository>>;

    /// All stored rows, raw, ordered by id.
    async fn select_all(&self) -> MetadataResult<Vec<Repository>>;

    /// Remove every row. Returns the number removed.
    async fn delete_all(&self) -> MetadataResult<u64>;
}
