//! Write-through projection of stored repositories into the cache.

use crate::client::KvCache;
use crate::error::{CacheError, CacheResult};
use futures::{StreamExt, TryStreamExt, stream};
use repomirror_core::Repository;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

/// Fixed key of the repository name index.
pub const NAME_INDEX_KEY: &str = "currentRepos";

/// Hash field of [`NAME_INDEX_KEY`] holding the JSON name list.
pub const NAME_INDEX_FIELD: &str = "repos";

/// Substituted for missing or empty text fields.
pub const PLACEHOLDER: &str = "n/a";

/// The value cached under a repository's name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedRepo {
    #[serde(rename = "repoID")]
    pub repo_id: i64,
    pub name: String,
    pub description: String,
    #[serde(rename = "htmlURL")]
    pub html_url: String,
    pub homepage: String,
    pub tag: Vec<String>,
    #[serde(rename = "createdAt")]
    pub created_at: Option<String>,
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<String>,
}

fn or_placeholder(value: Option<&str>) -> String {
    match value {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}

impl From<&Repository> for CachedRepo {
    fn from(repo: &Repository) -> Self {
        Self {
            repo_id: repo.repo_id,
            name: repo.name.clone(),
            description: or_placeholder(repo.description.as_deref()),
            html_url: or_placeholder(Some(&repo.html_url)),
            homepage: or_placeholder(repo.homepage.as_deref()),
            tag: repo.tag.clone().unwrap_or_default(),
            created_at: repo.created_at.clone(),
            updated_at: repo.updated_at.clone(),
        }
    }
}

/// Writes the per-repository entries and the name index.
#[derive(Clone)]
pub struct CacheMirror {
    cache: Arc<dyn KvCache>,
    write_concurrency: usize,
}

impl CacheMirror {
    /// `write_concurrency` bounds in-flight per-repository writes; 1 writes strictly in order.
    pub fn new(cache: Arc<dyn KvCache>, write_concurrency: usize) -> Self {
        Self {
            cache,
            write_concurrency: write_concurrency.max(1),
        }
    }

    /// `SET name <CachedRepo JSON>` for each repository. The first failure aborts the rest.
    pub async fn write_repos(&self, repos: &[Repository]) -> CacheResult<()> {
        let entries = repos
            .iter()
            .map(|repo| -> CacheResult<(String, String)> {
                let value = serde_json::to_string(&CachedRepo::from(repo))?;
                Ok((repo.name.clone(), value))
            })
            .collect::<CacheResult<Vec<_>>>()?;

        let cache = &self.cache;
        stream::iter(entries)
            .map(|(key, value)| async move { cache.set(&key, &value).await })
            .buffered(self.write_concurrency)
            .try_collect::<Vec<()>>()
            .await?;

        tracing::debug!(repo_count = repos.len(), "Mirrored repositories to cache");
        Ok(())
    }

    /// `HSET currentRepos repos <JSON array of names, in order>`.
    pub async fn write_name_index(&self, repos: &[Repository]) -> CacheResult<()> {
        let names: Vec<&str> = repos.iter().map(|repo| repo.name.as_str()).collect();
        let value = serde_json::to_string(&names)?;
        self.cache
            .hset(NAME_INDEX_KEY, NAME_INDEX_FIELD, &value)
            .await
    }

    /// Read back one repository entry.
    /// Delete the entries of names in `previous` that `current` no longer has.
    ///
    /// `previous` is the name index as it was before a resync. Returns the
    /// number of entries removed.
    pub async fn remove_stale(
        &self,
        previous: &[String],
        current: &[Repository],
    ) -> CacheResult<u64> {
        let current: HashSet<&str> = current.iter().map(|repo| repo.name.as_str()).collect();
        let stale: Vec<&str> = previous
            .iter()
            .map(String::as_str)
            .filter(|name| !current.contains(name) && *name != NAME_INDEX_KEY)
            .collect();
        if stale.is_empty() {
            return Ok(0);
        }

        let removed = self.cache.del(&stale).await?;
        tracing::info!(removed, "Removed stale repository entries from cache");
        Ok(removed)
    }

    pub async fn read_repo(&self, name: &str) -> CacheResult<Option<CachedRepo>> {
        match self.cache.get(name).await? {
            Some(value) => Ok(Some(serde_json::from_str(&value)?)),
            None => Ok(None),
        }
    }

    /// Read back the name index.
    pub async fn read_name_index(&self) -> CacheResult<Option<Vec<String>>> {
        match self.cache.hget(NAME_INDEX_KEY, NAME_INDEX_FIELD).await? {
            Some(value) => serde_json::from_str(&value)
                .map(Some)
                .map_err(CacheError::from),
            None => Ok(None),
        }
    }
}
