//! Server test utilities.

use repomirror_cache::{CacheMirror, MemoryCache};
use repomirror_core::config::AppConfig;
use repomirror_metadata::{MemoryStore, MetadataStore};
use repomirror_server::{AppState, create_router};
use repomirror_sync::SyncService;
use repomirror_upstream::RepoSource;
use std::sync::Arc;

/// A test server wrapper with all dependencies.
/// Note: #[allow(dead_code)] because each test file compiles common/ separately.
#[allow(dead_code)]
pub struct TestServer {
    pub router: axum::Router,
    pub state: AppState,
    pub store: Arc<dyn MetadataStore>,
    pub cache: Arc<MemoryCache>,
}

#[allow(dead_code)]
impl TestServer {
    /// In-memory store and cache, fed by `source`.
    pub fn with_source(source: Arc<dyn RepoSource>) -> Self {
        Self::build(AppConfig::for_testing(), Arc::new(MemoryStore::new()), source)
    }

    /// Custom config and store, fed by `source`.
    pub fn build(
        config: AppConfig,
        store: Arc<dyn MetadataStore>,
        source: Arc<dyn RepoSource>,
    ) -> Self {
        repomirror_server::metrics::register_metrics();

        let cache = Arc::new(MemoryCache::new());
        let mirror = CacheMirror::new(cache.clone(), config.sync.cache_write_concurrency);
        let sync = SyncService::new(store.clone(), source, mirror);
        let state = AppState::new(config, store.clone(), sync);
        let router = create_router(state.clone());

        Self {
            router,
            state,
            store,
            cache,
        }
    }
}
