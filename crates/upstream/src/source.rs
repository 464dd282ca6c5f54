//! Repository source trait.

use crate::error::UpstreamResult;
use async_trait::async_trait;
use repomirror_core::Repository;

/// A provider of the configured account's repositories.
#[async_trait]
pub trait RepoSource: Send + Sync {
    /// Fetch the account's repositories, newest first. Records carry no `id`.
    async fn fetch_repositories(&self) -> UpstreamResult<Vec<Repository>>;
}
