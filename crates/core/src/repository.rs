//! Repository record mirrored from the upstream platform.

use serde::{Deserialize, Serialize};

/// Maximum length of a repository name.
pub const MAX_NAME_LEN: usize = 150;

/// Maximum length of `html_url` and `homepage`.
pub const MAX_URL_LEN: usize = 255;

/// Maximum length of the upstream timestamp strings.
pub const MAX_TIMESTAMP_LEN: usize = 30;

/// One source-control project's metadata.
///
/// `id` is assigned by the relational store and is `None` for records that
/// came straight from the upstream client. Timestamps are kept verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(rename = "repoID")]
    pub repo_id: i64,
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "htmlURL")]
    pub html_url: String,
    pub homepage: Option<String>,
    pub tag: Option<Vec<String>>,
    #[serde(rename = "createdAt")]
    pub created_at: Option<String>,
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<String>,
}

impl Repository {
    /// Check the required fields and column length limits.
    pub fn validate(&self) -> crate::Result<()> {
        if self.name.is_empty() {
            return Err(crate::Error::InvalidRepository(format!(
                "repository {} has an empty name",
                self.repo_id
            )));
        }
        check_len("name", &self.name, MAX_NAME_LEN, &self.name)?;
        check_len("htmlURL", &self.html_url, MAX_URL_LEN, &self.name)?;
        if let Some(homepage) = &self.homepage {
            check_len("homepage", homepage, MAX_URL_LEN, &self.name)?;
        }
        if let Some(created_at) = &self.created_at {
            check_len("createdAt", created_at, MAX_TIMESTAMP_LEN, &self.name)?;
        }
        if let Some(updated_at) = &self.updated_at {
            check_len("updatedAt", updated_at, MAX_TIMESTAMP_LEN, &self.name)?;
        }
        Ok(())
    }
}

fn check_len(field: &str, value: &str, max: usize, name: &str) -> crate::Result<()> {
    // Column limits are VARCHAR(n), which counts characters, not bytes.
    let len = value.chars().count();
    if len > max {
        return Err(crate::Error::InvalidRepository(format!(
            "{field} of repository '{name}' is {len} characters (max {max})"
        )));
    }
    Ok(())
}
