//! HTTP surface for repomirror.
//!
//! This crate wires the sync pipeline to axum:
//! - Repository listing with self-healing reads and a refresh trigger
//! - The page-load data route
//! - Login with static credentials
//! - Health and Prometheus endpoints

pub mod auth;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod routes;
pub mod state;
pub mod trace;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
pub use trace::TraceId;
