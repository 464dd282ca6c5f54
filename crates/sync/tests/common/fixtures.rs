use repomirror_core::Repository;

/// An upstream record as the client would produce it (no `id`, nullable fields unset).
pub fn repo(repo_id: i64, name: &str) -> Repository {
    Repository {
        id: None,
        repo_id,
        name: name.to_string(),
        description: None,
        html_url: format!("https://github.com/permalik/{name}"),
        homepage: None,
        tag: None,
        created_at: Some("2024-01-01T00:00:00Z".to_string()),
        updated_at: None,
    }
}

/// Three upstream records, newest first.
pub fn upstream_repos() -> Vec<Repository> {
    let mut tagged = repo(3, "gamma");
    tagged.description = Some("third".to_string());
    tagged.tag = Some(vec!["rust".to_string()]);
    vec![tagged, repo(2, "beta"), repo(1, "alpha")]
}
