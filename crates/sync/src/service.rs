//! Seed, self-healing fetch, and refresh.

use crate::error::SyncResult;
use repomirror_cache::CacheMirror;
use repomirror_core::Repository;
use repomirror_metadata::MetadataStore;
use repomirror_upstream::RepoSource;
use std::sync::Arc;

/// Composes the store, the upstream source, and the cache mirror.
///
/// Every step runs sequentially and the first failure aborts the rest.
/// Nothing is compensated: a cache failure after a successful insert leaves
/// the rows in place.
#[derive(Clone)]
pub struct SyncService {
    store: Arc<dyn MetadataStore>,
    source: Arc<dyn RepoSource>,
    mirror: CacheMirror,
}

impl SyncService {
    pub fn new(
        store: Arc<dyn MetadataStore>,
        source: Arc<dyn RepoSource>,
        mirror: CacheMirror,
    ) -> Self {
        Self {
            store,
            source,
            mirror,
        }
    }

    /// Create the table if needed, fetch upstream, persist, then mirror.
    ///
    /// Returns the inserted rows as echoed by the store (display view).
    pub async fn seed(&self) -> SyncResult<Vec<Repository>> {
        tracing::info!("Seeding repositories");
        self.store.ensure_schema().await?;
        let fetched = self.source.fetch_repositories().await?;
        let persisted = self.store.insert_all(&fetched).await?;
        self.mirror.write_repos(&persisted).await?;
        self.mirror.write_name_index(&persisted).await?;
        tracing::info!(repo_count = persisted.len(), "Seed complete");
        Ok(persisted)
    }

    /// All stored rows. A missing table triggers one seed and one retry.
    pub async fn fetch_all(&self) -> SyncResult<Vec<Repository>> {
        match self.store.select_all().await {
            Ok(repos) => {
                tracing::debug!(repo_count = repos.len(), "Fetched repositories");
                Ok(repos)
            }
            Err(err) if err.is_schema_missing() => {
                tracing::warn!(error = %err, "Repository table missing, seeding before retry");
                self.seed().await?;
                // The retry is not repaired again.
                let repos = self.store.select_all().await?;
                tracing::info!(repo_count = repos.len(), "Fetched repositories after seeding");
                Ok(repos)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Delete every row, then seed. A missing table is an error here, not repaired.
    ///
    /// Cache entries of repositories that vanished upstream are deleted once
    /// the new rows are mirrored; the previous name index says which exist.
    pub async fn refresh(&self) -> SyncResult<Vec<Repository>> {
        let previous = self.mirror.read_name_index().await?.unwrap_or_default();
        let removed = self.store.delete_all().await?;
        tracing::info!(removed, "Cleared repositories for refresh");
        let persisted = self.seed().await?;
        self.mirror.remove_stale(&previous, &persisted).await?;
        Ok(persisted)
    }

    pub fn mirror(&self) -> &CacheMirror {
        &self.mirror
    }
}
