//! In-process metadata store.
//!
//! Mirrors the PostgreSQL semantics: the table does not exist until
//! `ensure_schema`, ids are never reused after `delete_all`, and inserts echo
//! the display projection while storing the raw values.

use crate::error::{MetadataError, MetadataResult};
use crate::models::RepoRow;
use crate::repos::RepositoryRepo;
use crate::store::MetadataStore;
use async_trait::async_trait;
use repomirror_core::Repository;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;

const MISSING_TABLE: &str = "relation \"repos\" does not exist";

#[derive(Debug, Default)]
struct Table {
    rows: Vec<RepoRow>,
    next_id: i32,
}

/// Metadata store held in memory. Contents are lost when it is dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    table: Mutex<Option<Table>>,
    closed: AtomicBool,
}

impl MemoryStore {
    /// Create a store with no `repos` table.
    pub fn new() -> Self {
        Self::default()
    }

    fn check_open(&self) -> MetadataResult<()> {
        if self.closed.load(Ordering::Acquire) {
            return Err(MetadataError::Internal("store is closed".to_string()));
        }
        Ok(())
    }
}

fn missing_table() -> MetadataError {
    MetadataError::SchemaMissing(MISSING_TABLE.to_string())
}

#[async_trait]
impl MetadataStore for MemoryStore {
    async fn health_check(&self) -> MetadataResult<()> {
        self.check_open()
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }
}

#[async_trait]
impl RepositoryRepo for MemoryStore {
    async fn ensure_schema(&self) -> MetadataResult<()> {
        self.check_open()?;
        let mut table = self.table.lock().await;
        if table.is_none() {
            *table = Some(Table {
                rows: Vec::new(),
                next_id: 1,
            });
        }
        Ok(())
    }

    async fn insert_all(&self, repos: &[Repository]) -> MetadataResult<Vec<Repository>> {
        self.check_open()?;
        if repos.is_empty() {
            return Ok(Vec::new());
        }
        for repo in repos {
            repo.validate()?;
        }

        let mut guard = self.table.lock().await;
        let table = guard.as_mut().ok_or_else(missing_table)?;
        let mut inserted = Vec::with_capacity(repos.len());
        for repo in repos {
            let row = RepoRow::from_repository(table.next_id, repo);
            table.next_id += 1;
            inserted.push(row.display().into_repository());
            table.rows.push(row);
        }
        Ok(inserted)
    }

    async fn select_all(&self) -> MetadataResult<Vec<Repository>> {
        self.check_open()?;
        let guard = self.table.lock().await;
        let table = guard.as_ref().ok_or_else(missing_table)?;
        Ok(table
            .rows
            .iter()
            .cloned()
            .map(RepoRow::into_repository)
            .collect())
    }

    async fn delete_all(&self) -> MetadataResult<u64> {
        self.check_open()?;
        let mut guard = self.table.lock().await;
        let table = guard.as_mut().ok_or_else(missing_table)?;
        let removed = table.rows.len() as u64;
        table.rows.clear();
        Ok(removed)
    }
}
