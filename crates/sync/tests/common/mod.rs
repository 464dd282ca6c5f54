pub mod fixtures;
pub mod mocks;

#[allow(unused_imports)]
pub use fixtures::{repo, upstream_repos};
#[allow(unused_imports)]
pub use mocks::{CountingStore, FailingCache, FailingSource, StaticSource};
