//! Application state shared across handlers.

use repomirror_core::config::AppConfig;
use repomirror_metadata::MetadataStore;
use repomirror_sync::SyncService;
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Relational store, for health checks and shutdown.
    pub metadata: Arc<dyn MetadataStore>,
    /// Sync pipeline.
    pub sync: SyncService,
}

impl AppState {
    pub fn new(config: AppConfig, metadata: Arc<dyn MetadataStore>, sync: SyncService) -> Self {
        Self {
            config: Arc::new(config),
            metadata,
            sync,
        }
    }
}
