//! GitHub REST API client.

use crate::error::{UpstreamError, UpstreamResult};
use crate::source::RepoSource;
use async_trait::async_trait;
use repomirror_core::Repository;
use repomirror_core::config::{AccountKind, UpstreamConfig};
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::Deserialize;
use url::Url;

const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";

/// One item of the repository listing. Only the mirrored fields are decoded.
#[derive(Debug, Deserialize)]
struct GitHubRepo {
    id: i64,
    name: String,
    description: Option<String>,
    html_url: String,
    homepage: Option<String>,
    #[serde(default)]
    topics: Option<Vec<String>>,
    created_at: Option<String>,
    updated_at: Option<String>,
}

impl From<GitHubRepo> for Repository {
    fn from(item: GitHubRepo) -> Self {
        Repository {
            id: None,
            repo_id: item.id,
            name: item.name,
            description: item.description,
            html_url: item.html_url,
            homepage: item.homepage,
            tag: item.topics,
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

/// Client for one account's public repository listing.
#[derive(Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    repos_url: Url,
    token: Option<String>,
}

impl GitHubClient {
    pub fn new(config: &UpstreamConfig) -> UpstreamResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_MEDIA_TYPE));

        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            http,
            repos_url: repos_url(&config.api_url, config.kind, &config.account)?,
            token: config.token.clone(),
        })
    }

    /// The listing URL requests are sent to.
    pub fn repos_url(&self) -> &Url {
        &self.repos_url
    }
}

/// `{api_url}/{users|orgs}/{account}/repos?type=public&sort=created`, keeping any
/// path prefix of `api_url`.
fn repos_url(api_url: &str, kind: AccountKind, account: &str) -> UpstreamResult<Url> {
    let mut url = Url::parse(api_url)
        .map_err(|e| UpstreamError::Config(format!("invalid upstream.api_url '{api_url}': {e}")))?;
    url.path_segments_mut()
        .map_err(|_| UpstreamError::Config(format!("upstream.api_url '{api_url}' cannot be a base")))?
        .pop_if_empty()
        .extend([kind.path_segment(), account, "repos"]);
    url.query_pairs_mut()
        .append_pair("type", "public")
        .append_pair("sort", "created");
    Ok(url)
}

#[async_trait]
impl RepoSource for GitHubClient {
    async fn fetch_repositories(&self) -> UpstreamResult<Vec<Repository>> {
        let mut request = self.http.get(self.repos_url.clone());
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Upstream repository listing failed");
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let items: Vec<GitHubRepo> = serde_json::from_str(&body)?;
        tracing::debug!(repo_count = items.len(), "Fetched upstream repositories");
        Ok(items.into_iter().map(Repository::from).collect())
    }
}
