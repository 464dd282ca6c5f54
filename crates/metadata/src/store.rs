//! Metadata store trait.

use crate::error::MetadataResult;
use crate::repos::RepositoryRepo;
use async_trait::async_trait;

/// Combined metadata store trait.
#[async_trait]
pub trait MetadataStore: RepositoryRepo + Send + Sync {
    /// Check database connectivity and health.
    async fn health_check(&self) -> MetadataResult<()>;

    /// Release pooled connections. Further calls fail.
    async fn close(&self);
}
