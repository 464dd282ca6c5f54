//! In-process cache.

use crate::client::KvCache;
use crate::error::{CacheError, CacheResult};
use async_trait::async_trait;
use dashmap::DashMap;
use std::collections::HashMap;

const WRONG_TYPE: &str =
    "WRONGTYPE Operation against a key holding the wrong kind of value";

#[derive(Debug, Clone)]
enum Entry {
    String(String),
    Hash(HashMap<String, String>),
}

/// Cache held in memory, with Redis key-type semantics.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: DashMap<String, Entry>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl KvCache for MemoryCache {
    async fn set(&self, key: &str, value: &str) -> CacheResult<()> {
        // SET replaces a key of any type.
        self.entries
            .insert(key.to_string(), Entry::String(value.to_string()));
        Ok(())
    }

    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        match self.entries.get(key).as_deref() {
            None => Ok(None),
            Some(Entry::String(value)) => Ok(Some(value.clone())),
            Some(Entry::Hash(_)) => Err(CacheError::Command(WRONG_TYPE.to_string())),
        }
    }

    async fn hset(&self, key: &str, field: &str, value: &str) -> CacheResult<()> {
        let mut entry = self
            .entries
            .entry(key.to_string())
            .or_insert_with(|| Entry::Hash(HashMap::new()));
        match entry.value_mut() {
            Entry::Hash(fields) => {
                fields.insert(field.to_string(), value.to_string());
                Ok(())
            }
            Entry::String(_) => Err(CacheError::Command(WRONG_TYPE.to_string())),
        }
    }

    async fn hget(&self, key: &str, field: &str) -> CacheResult<Option<String>> {
        match self.entries.get(key).as_deref() {
            None => Ok(None),
            Some(Entry::Hash(fields)) => Ok(fields.get(field).cloned()),
            Some(Entry::String(_)) => Err(CacheError::Command(WRONG_TYPE.to_string())),
        }
    }

    async fn del(&self, keys: &[&str]) -> CacheResult<u64> {
        let mut removed = 0;
        for key in keys {
            if self.entries.remove(*key).is_some() {
                removed += 1;
            }
        }
        Ok(removed)
    }
}
