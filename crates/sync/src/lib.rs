//! Repository synchronization pipeline.
//!
//! [`SyncService`] turns an upstream listing into stored rows and cache
//! entries, and serves reads that repair a missing table on demand.

pub mod error;
pub mod service;

pub use error::{SyncError, SyncResult};
pub use service::SyncService;
