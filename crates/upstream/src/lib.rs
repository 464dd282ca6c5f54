//! Upstream repository listing.
//!
//! Fetches the configured account's repositories from the hosting platform
//! and normalizes each item into a [`Repository`](repomirror_core::Repository).
//! Only the first page is read.

pub mod error;
pub mod github;
pub mod source;

pub use error::{UpstreamError, UpstreamResult};
pub use github::GitHubClient;
pub use source::RepoSource;
