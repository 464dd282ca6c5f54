//! Test fixtures and upstream doubles.

use async_trait::async_trait;
use repomirror_core::Repository;
use repomirror_upstream::{RepoSource, UpstreamError, UpstreamResult};
use serde_json::{Value, json};
use std::sync::Mutex;

/// An upstream record with nullable fields unset.
#[allow(dead_code)]
pub fn test_repo(repo_id: i64, name: &str) -> Repository {
    Repository {
        id: None,
        repo_id,
        name: name.to_string(),
        description: None,
        html_url: format!("https://github.com/permalik/{name}"),
        homepage: None,
        tag: None,
        created_at: Some("2024-02-02T10:00:00Z".to_string()),
        updated_at: None,
    }
}

/// A page of the upstream listing as the platform returns it.
#[allow(dead_code)]
pub fn github_listing() -> Value {
    json!([
        {
            "id": 501,
            "name": "utility",
            "description": "Small tools",
            "html_url": "https://github.com/permalik/utility",
            "homepage": null,
            "topics": ["go", "redis"],
            "created_at": "2024-06-01T08:00:00Z",
            "updated_at": "2024-06-03T08:00:00Z",
            "fork": false
        },
        {
            "id": 400,
            "name": "dotfiles",
            "description": null,
            "html_url": "https://github.com/permalik/dotfiles",
            "homepage": "",
            "topics": [],
            "created_at": "2023-09-12T08:00:00Z",
            "updated_at": null,
            "fork": false
        }
    ])
}

/// Serves a fixed listing.
#[allow(dead_code)]
pub struct StaticSource(pub Mutex<Vec<Repository>>);

#[allow(dead_code)]
impl StaticSource {
    pub fn new(repos: Vec<Repository>) -> Self {
        Self(Mutex::new(repos))
    }
}

#[async_trait]
impl RepoSource for StaticSource {
    async fn fetch_repositories(&self) -> UpstreamResult<Vec<Repository>> {
        Ok(self.0.lock().unwrap().clone())
    }
}

/// Fails like an unreachable upstream.
#[allow(dead_code)]
pub struct FailingSource;

#[async_trait]
impl RepoSource for FailingSource {
    async fn fetch_repositories(&self) -> UpstreamResult<Vec<Repository>> {
        Err(UpstreamError::Status {
            status: 502,
            body: "bad gateway".to_string(),
        })
    }
}
