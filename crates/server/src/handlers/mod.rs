//! HTTP request handlers.

pub mod auth;
pub mod health;
pub mod repos;

pub use auth::*;
pub use health::*;
pub use repos::*;
