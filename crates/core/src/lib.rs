//! Core domain types and shared configuration for repomirror.
//!
//! This crate defines the canonical data model used across all other crates:
//! - The mirrored repository record and its column limits
//! - Configuration for the store, cache, upstream client, auth, and server

pub mod config;
pub mod error;
pub mod repository;

pub use error::{Error, Result};
pub use repository::{MAX_NAME_LEN, MAX_TIMESTAMP_LEN, MAX_URL_LEN, Repository};
