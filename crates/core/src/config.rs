//! Configuration types shared across crates.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Server configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:5555").
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Enable the /metrics endpoint for Prometheus scraping (default: true).
    #[serde(default = "default_metrics_enabled")]
    pub metrics_enabled: bool,
}

fn default_bind() -> String {
    "127.0.0.1:5555".to_string()
}

fn default_metrics_enabled() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            metrics_enabled: default_metrics_enabled(),
        }
    }
}

/// PostgreSQL SSL mode configuration.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PgSslMode {
    /// Disable SSL/TLS entirely.
    Disable,
    /// Prefer SSL/TLS but allow unencrypted connections (default).
    #[default]
    Prefer,
    /// Require SSL/TLS for all connections.
    Require,
}

/// Relational store configuration.
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MetadataConfig {
    /// In-process store (development and tests; contents are lost on exit).
    Memory,
    /// PostgreSQL database.
    Postgres {
        /// Connection URL (optional if using individual fields).
        /// Takes precedence over individual fields if both are provided.
        url: Option<String>,
        /// Database host (e.g., "localhost" or "db.example.com").
        host: Option<String>,
        /// Database port (default: 5432).
        #[serde(default = "default_pg_port")]
        port: Option<u16>,
        /// Database username.
        username: Option<String>,
        /// Database password.
        /// Prefer REPOMIRROR_METADATA__PASSWORD over storing it in a file.
        password: Option<String>,
        /// Database name.
        database: Option<String>,
        /// SSL mode for connections.
        ssl_mode: Option<PgSslMode>,
        /// Maximum connections in the pool.
        #[serde(default = "default_max_connections")]
        max_connections: u32,
        /// Statement timeout in milliseconds.
        #[serde(default)]
        statement_timeout_ms: Option<u64>,
    },
}

fn default_max_connections() -> u32 {
    3
}

fn default_pg_port() -> Option<u16> {
    Some(5432)
}

impl MetadataConfig {
    /// Validate metadata configuration invariants.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            MetadataConfig::Memory => Ok(()),
            MetadataConfig::Postgres {
                url,
                host,
                database,
                max_connections,
                ..
            } => {
                if *max_connections == 0 {
                    return Err("metadata.max_connections must be at least 1".to_string());
                }
                match (url.as_ref(), host.as_ref(), database.as_ref()) {
                    (Some(_), _, _) => Ok(()),
                    (None, Some(_), Some(_)) => Ok(()),
                    (None, None, _) => Err(
                        "postgres config requires either 'url' or 'host' + 'database'".to_string(),
                    ),
                    (None, Some(_), None) => Err(
                        "postgres config requires 'database' when using individual fields"
                            .to_string(),
                    ),
                }
            }
        }
    }
}

impl fmt::Debug for MetadataConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => f.write_str("Memory"),
            Self::Postgres {
                url,
                host,
                port,
                username,
                password,
                database,
                ssl_mode,
                max_connections,
                statement_timeout_ms,
            } => f
                .debug_struct("Postgres")
                .field("url", &url.as_ref().map(|_| "<redacted>"))
                .field("host", host)
                .field("port", port)
                .field("username", username)
                .field("password", &password.as_ref().map(|_| "<redacted>"))
                .field("database", database)
                .field("ssl_mode", ssl_mode)
                .field("max_connections", max_connections)
                .field("statement_timeout_ms", statement_timeout_ms)
                .finish(),
        }
    }
}

/// Key-value cache configuration.
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CacheConfig {
    /// In-process cache (development and tests).
    Memory,
    /// Upstash Redis over its REST interface.
    Upstash {
        /// REST endpoint URL (e.g., "https://eu1-example.upstash.io").
        url: String,
        /// REST bearer token.
        token: String,
    },
}

impl CacheConfig {
    /// Validate cache configuration invariants.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            CacheConfig::Memory => Ok(()),
            CacheConfig::Upstash { url, token } => {
                if url.trim().is_empty() {
                    return Err("cache.url cannot be empty".to_string());
                }
                if token.trim().is_empty() {
                    return Err("cache.token cannot be empty".to_string());
                }
                Ok(())
            }
        }
    }
}

impl fmt::Debug for CacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => f.write_str("Memory"),
            Self::Upstash { url, .. } => f
                .debug_struct("Upstash")
                .field("url", url)
                .field("token", &"<redacted>")
                .finish(),
        }
    }
}

/// Kind of upstream account, which selects the listing endpoint.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    /// `GET /users/{account}/repos` (default).
    #[default]
    User,
    /// `GET /orgs/{account}/repos`.
    Org,
}

impl AccountKind {
    /// First path segment of the listing endpoint.
    pub fn path_segment(self) -> &'static str {
        match self {
            AccountKind::User => "users",
            AccountKind::Org => "orgs",
        }
    }
}

/// Upstream platform API configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// API base URL.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Account whose repositories are mirrored.
    #[serde(default = "default_account")]
    pub account: String,
    /// Whether `account` is a user or an organization.
    #[serde(default)]
    pub kind: AccountKind,
    /// Optional personal access token (raises the upstream rate limit).
    #[serde(default)]
    pub token: Option<String>,
    /// User-Agent header sent upstream (the API rejects requests without one).
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Request timeout in seconds.
    #[serde(default = "default_upstream_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_account() -> String {
    "permalik".to_string()
}

fn default_user_agent() -> String {
    concat!("repomirror/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_upstream_timeout_secs() -> u64 {
    30
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            account: default_account(),
            kind: AccountKind::default(),
            token: None,
            user_agent: default_user_agent(),
            timeout_secs: default_upstream_timeout_secs(),
        }
    }
}

impl UpstreamConfig {
    /// Get the request timeout as a Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate upstream configuration invariants.
    pub fn validate(&self) -> Result<(), String> {
        if self.account.trim().is_empty() {
            return Err("upstream.account cannot be empty".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("upstream.timeout_secs must be at least 1".to_string());
        }
        Ok(())
    }
}

impl fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("api_url", &self.api_url)
            .field("account", &self.account)
            .field("kind", &self.kind)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("user_agent", &self.user_agent)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Login credentials and redirect targets.
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Accepted email.
    pub email: String,
    /// Accepted password.
    pub password: String,
    /// Redirect target after a successful login.
    #[serde(default = "default_protected_route")]
    pub protected_route: String,
    /// Redirect target after a failed login.
    #[serde(default = "default_origin_route")]
    pub origin_route: String,
}

fn default_protected_route() -> String {
    "/tools".to_string()
}

fn default_origin_route() -> String {
    "/".to_string()
}

impl AuthConfig {
    /// Create a test configuration with fixed credentials.
    ///
    /// **For testing only.**
    pub fn for_testing() -> Self {
        Self {
            email: "owner@example.test".to_string(),
            password: "correct horse battery staple".to_string(),
            protected_route: default_protected_route(),
            origin_route: default_origin_route(),
        }
    }

    /// Validate auth configuration invariants.
    pub fn validate(&self) -> Result<(), String> {
        if self.email.is_empty() || self.password.is_empty() {
            return Err("auth.email and auth.password must both be set".to_string());
        }
        for (field, route) in [
            ("auth.protected_route", &self.protected_route),
            ("auth.origin_route", &self.origin_route),
        ] {
            if !route.starts_with('/') {
                return Err(format!("{field} must be an absolute path, got '{route}'"));
            }
        }
        Ok(())
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("protected_route", &self.protected_route)
            .field("origin_route", &self.origin_route)
            .finish()
    }
}

/// Sync pipeline tuning.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Maximum in-flight per-repository cache writes (default: 1, strictly sequential).
    #[serde(default = "default_cache_write_concurrency")]
    pub cache_write_concurrency: usize,
}

fn default_cache_write_concurrency() -> usize {
    1
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            cache_write_concurrency: default_cache_write_concurrency(),
        }
    }
}

impl SyncConfig {
    /// Validate sync configuration invariants.
    pub fn validate(&self) -> Result<(), String> {
        if self.cache_write_concurrency == 0 {
            return Err("sync.cache_write_concurrency must be at least 1".to_string());
        }
        Ok(())
    }
}

/// Complete application configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Relational store configuration (required).
    pub metadata: MetadataConfig,
    /// Cache configuration (required).
    pub cache: CacheConfig,
    /// Upstream API configuration.
    #[serde(default)]
    pub upstream: UpstreamConfig,
    /// Login configuration (required).
    pub auth: AuthConfig,
    /// Sync pipeline tuning.
    #[serde(default)]
    pub sync: SyncConfig,
}

impl AppConfig {
    /// Create a test configuration with in-process backends.
    ///
    /// **For testing only.**
    pub fn for_testing() -> Self {
        Self {
            server: ServerConfig::default(),
            metadata: MetadataConfig::Memory,
            cache: CacheConfig::Memory,
            upstream: UpstreamConfig::default(),
            auth: AuthConfig::for_testing(),
            sync: SyncConfig::default(),
        }
    }

    /// Validate every section, returning the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        self.metadata.validate()?;
        self.cache.validate()?;
        self.upstream.validate()?;
        self.auth.validate()?;
        self.sync.validate()?;
        Ok(())
    }
}
