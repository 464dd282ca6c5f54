//! Database models mapping to the `repos` table.

use repomirror_core::Repository;
use sqlx::FromRow;
use sqlx::types::Json;

/// Placeholder the display projection substitutes for NULL text columns.
pub const DISPLAY_PLACEHOLDER: &str = "n/a";

/// A row exactly as stored. Nullable columns stay `None`.
#[derive(Debug, Clone, FromRow)]
pub struct RepoRow {
    pub id: i32,
    pub repo_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub html_url: String,
    pub homepage: Option<String>,
    pub tag: Option<Json<Vec<String>>>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl RepoRow {
    /// Build the row a fresh insert would store for `repo` under `id`.
    pub fn from_repository(id: i32, repo: &Repository) -> Self {
        Self {
            id,
            repo_id: repo.repo_id,
            name: repo.name.clone(),
            description: repo.description.clone(),
            html_url: repo.html_url.clone(),
            homepage: repo.homepage.clone(),
            tag: repo.tag.clone().map(Json),
            created_at: repo.created_at.clone(),
            updated_at: repo.updated_at.clone(),
        }
    }

    /// The display projection of this row (NULLs replaced, stored row untouched).
    pub fn display(&self) -> RepoDisplayRow {
        RepoDisplayRow {
            id: self.id,
            repo_id: self.repo_id,
            name: self.name.clone(),
            description: self
                .description
                .clone()
                .unwrap_or_else(|| DISPLAY_PLACEHOLDER.to_string()),
            html_url: self.html_url.clone(),
            homepage: self
                .homepage
                .clone()
                .unwrap_or_else(|| DISPLAY_PLACEHOLDER.to_string()),
            tag: self.tag.clone().unwrap_or_else(|| Json(Vec::new())),
            created_at: self.created_at.clone(),
            updated_at: self.updated_at.clone(),
        }
    }

    pub fn into_repository(self) -> Repository {
        Repository {
            id: Some(self.id),
            repo_id: self.repo_id,
            name: self.name,
            description: self.description,
            html_url: self.html_url,
            homepage: self.homepage,
            tag: self.tag.map(|Json(tag)| tag),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// The `RETURNING` projection of an insert, with COALESCE defaults applied.
///
/// Values here may differ from what is stored: a NULL `description` is
/// echoed back as `"n/a"` but remains NULL in the table.
#[derive(Debug, Clone, FromRow)]
pub struct RepoDisplayRow {
    pub id: i32,
    pub repo_id: i64,
    pub name: String,
    pub description: String,
    pub html_url: String,
    pub homepage: String,
    pub tag: Json<Vec<String>>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl RepoDisplayRow {
    pub fn into_repository(self) -> Repository {
        Repository {
            id: Some(self.id),
            repo_id: self.repo_id,
            name: self.name,
            description: Some(self.description),
            html_url: self.html_url,
            homepage: Some(self.homepage),
            tag: Some(self.tag.0),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
