use async_trait::async_trait;
use repomirror_cache::{CacheError, CacheResult, KvCache};
use repomirror_core::Repository;
use repomirror_metadata::{
    MemoryStore, MetadataError, MetadataResult, MetadataStore, RepositoryRepo,
};
use repomirror_upstream::{RepoSource, UpstreamError, UpstreamResult};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Wraps a [`MemoryStore`], counting calls and injecting select failures.
#[allow(dead_code)]
#[derive(Default)]
pub struct CountingStore {
    pub inner: MemoryStore,
    pub ensure_schema_calls: AtomicUsize,
    pub select_calls: AtomicUsize,
    pub insert_calls: AtomicUsize,
    pub delete_calls: AtomicUsize,
    select_failures: Mutex<VecDeque<MetadataError>>,
}

#[allow(dead_code)]
impl CountingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `select_all` fail with `err`. Queued failures are used in order.
    pub fn fail_next_select(&self, err: MetadataError) {
        self.select_failures.lock().unwrap().push_back(err);
    }

    pub fn seeds(&self) -> usize {
        self.ensure_schema_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RepositoryRepo for CountingStore {
    async fn ensure_schema(&self) -> MetadataResult<()> {
        self.ensure_schema_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.ensure_schema().await
    }

    async fn insert_all(&self, repos: &[Repository]) -> MetadataResult<Vec<Repository>> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.insert_all(repos).await
    }

    async fn select_all(&self) -> MetadataResult<Vec<Repository>> {
        self.select_calls.fetch_add(1, Ordering::SeqCst);
        let injected = self.select_failures.lock().unwrap().pop_front();
        if let Some(err) = injected {
            return Err(err);
        }
        self.inner.select_all().await
    }

    async fn delete_all(&self) -> MetadataResult<u64> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.delete_all().await
    }
}

#[async_trait]
impl MetadataStore for CountingStore {
    async fn health_check(&self) -> MetadataResult<()> {
        self.inner.health_check().await
    }

    async fn close(&self) {
        self.inner.close().await;
    }
}

/// Returns a fixed listing. The listing can be swapped between calls.
#[allow(dead_code)]
pub struct StaticSource {
    repos: Mutex<Vec<Repository>>,
    pub calls: AtomicUsize,
}

#[allow(dead_code)]
impl StaticSource {
    pub fn new(repos: Vec<Repository>) -> Self {
        Self {
            repos: Mutex::new(repos),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn replace(&self, repos: Vec<Repository>) {
        *self.repos.lock().unwrap() = repos;
    }
}

#[async_trait]
impl RepoSource for StaticSource {
    async fn fetch_repositories(&self) -> UpstreamResult<Vec<Repository>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.repos.lock().unwrap().clone())
    }
}

/// Always fails as if upstream were unavailable.
#[allow(dead_code)]
pub struct FailingSource;

#[async_trait]
impl RepoSource for FailingSource {
    async fn fetch_repositories(&self) -> UpstreamResult<Vec<Repository>> {
        Err(UpstreamError::Status {
            status: 503,
            body: "upstream unavailable".to_string(),
        })
    }
}

/// Rejects every write.
#[allow(dead_code)]
#[derive(Default)]
pub struct FailingCache {
    pub attempts: AtomicUsize,
}

#[async_trait]
impl KvCache for FailingCache {
    async fn set(&self, _key: &str, _value: &str) -> CacheResult<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(CacheError::Command("cache offline".to_string()))
    }

    async fn get(&self, _key: &str) -> CacheResult<Option<String>> {
        Ok(None)
    }

    async fn hset(&self, _key: &str, _field: &str, _value: &str) -> CacheResult<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(CacheError::Command("cache offline".to_string()))
    }

    async fn hget(&self, _key: &str, _field: &str) -> CacheResult<Option<String>> {
        Ok(None)
    }

    async fn del(&self, _keys: &[&str]) -> CacheResult<u64> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(CacheError::Command("cache offline".to_string()))
    }
}
