//! Key-value cache clients and the repository cache mirror.
//!
//! The mirror is a derived projection of the relational store. It is only
//! written after a successful store write and is never read back by the
//! sync pipeline.

pub mod client;
pub mod error;
pub mod memory;
pub mod mirror;
pub mod upstash;

pub use client::KvCache;
pub use error::{CacheError, CacheResult};
pub use memory::MemoryCache;
pub use mirror::{CacheMirror, CachedRepo, NAME_INDEX_FIELD, NAME_INDEX_KEY};
pub use upstash::UpstashCache;

use repomirror_core::config::CacheConfig;
use std::sync::Arc;

/// Create a cache client from configuration.
pub fn from_config(config: &CacheConfig) -> CacheResult<Arc<dyn KvCache>> {
    match config {
        CacheConfig::Memory => {
            tracing::warn!("Using in-memory cache; entries are lost on exit");
            Ok(Arc::new(MemoryCache::new()) as Arc<dyn KvCache>)
        }
        CacheConfig::Upstash { url, token } => {
            tracing::info!(url = %url, "Using Upstash REST cache");
            Ok(Arc::new(UpstashCache::new(url, token)?) as Arc<dyn KvCache>)
        }
    }
}
