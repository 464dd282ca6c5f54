//! Key-value cache client trait.

use crate::error::CacheResult;
use async_trait::async_trait;

/// The subset of Redis commands the mirror needs. Values are strings.
#[async_trait]
pub trait KvCache: Send + Sync {
    /// `SET key value`, without expiry.
    async fn set(&self, key: &str, value: &str) -> CacheResult<()>;

    /// `GET key`.
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// `HSET key field value`.
    async fn hset(&self, key: &str, field: &str, value: &str) -> CacheResult<()>;

    /// `HGET key field`.
    async fn hget(&self, key: &str, field: &str) -> CacheResult<Option<String>>;

    /// `DEL key [key ...]`. Returns how many keys existed.
    async fn del(&self, keys: &[&str]) -> CacheResult<u64>;
}
