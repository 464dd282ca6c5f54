//! Repository traits for metadata operations.

pub mod repositories;

pub use repositories::RepositoryRepo;
