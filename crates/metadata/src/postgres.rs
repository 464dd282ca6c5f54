//! PostgreSQL-based metadata store implementation.

use crate::error::MetadataResult;
use crate::models::{RepoDisplayRow, RepoRow};
use crate::repos::RepositoryRepo;
use crate::store::MetadataStore;
use async_trait::async_trait;
use repomirror_core::Repository;
use repomirror_core::config::PgSslMode;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode as SqlxPgSslMode};
use sqlx::types::Json;
use sqlx::{Pool, Postgres, QueryBuilder};
use std::str::FromStr;

/// PostgreSQL schema (embedded).
const POSTGRES_SCHEMA: &str = include_str!("postgres_schema.sql");

const INSERT_COLUMNS: &str =
    "INSERT INTO repos (repo_id, name, description, html_url, homepage, tag, created_at, updated_at) ";

// COALESCE is applied to the returned columns only; stored NULLs stay NULL.
const DISPLAY_RETURNING: &str = r#"
    RETURNING id, repo_id, name,
        COALESCE(description, 'n/a') AS description,
        COALESCE(html_url, 'n/a') AS html_url,
        COALESCE(homepage, 'n/a') AS homepage,
        COALESCE(tag, '[]'::json) AS tag,
        created_at, updated_at
"#;

/// PostgreSQL-based metadata store.
pub struct PostgresStore {
    pool: Pool<Postgres>,
}

impl PostgresStore {
    /// Create a new PostgreSQL store from a connection URL.
    pub async fn from_url(
        url: &str,
        max_connections: u32,
        statement_timeout_ms: Option<u64>,
    ) -> MetadataResult<Self> {
        let opts = PgConnectOptions::from_str(url)?;
        Self::connect(opts, max_connections, statement_timeout_ms).await
    }

    /// Create a new PostgreSQL store from individual connection parameters.
    ///
    /// This allows credentials to be passed separately, e.g. the password via
    /// `REPOMIRROR_METADATA__PASSWORD`.
    #[allow(clippy::too_many_arguments)]
    pub async fn from_params(
        host: &str,
        port: u16,
        username: Option<&str>,
        password: Option<&str>,
        database: &str,
        ssl_mode: Option<PgSslMode>,
        max_connections: u32,
        statement_timeout_ms: Option<u64>,
    ) -> MetadataResult<Self> {
        let mut opts = PgConnectOptions::new()
            .host(host)
            .port(port)
            .database(database);

        if let Some(user) = username {
            opts = opts.username(user);
        }

        if let Some(pass) = password {
            opts = opts.password(pass);
        }

        if let Some(mode) = ssl_mode {
            let sqlx_mode = match mode {
                PgSslMode::Disable => SqlxPgSslMode::Disable,
                PgSslMode::Prefer => SqlxPgSslMode::Prefer,
                PgSslMode::Require => SqlxPgSslMode::Require,
            };
            opts = opts.ssl_mode(sqlx_mode);
        }

        // Log connection info without password
        tracing::info!(
            host = host,
            port = port,
            database = database,
            username = username.unwrap_or("<none>"),
            ssl_mode = ?ssl_mode,
            "Connecting to PostgreSQL with individual parameters"
        );

        Self::connect(opts, max_connections, statement_timeout_ms).await
    }

    /// Connect to PostgreSQL with the given options. The table is not created here.
    async fn connect(
        mut opts: PgConnectOptions,
        max_connections: u32,
        statement_timeout_ms: Option<u64>,
    ) -> MetadataResult<Self> {
        if let Some(timeout_ms) = statement_timeout_ms {
            opts = opts.options([("statement_timeout", format!("{}ms", timeout_ms))]);
            tracing::info!("PostgreSQL statement_timeout set to {}ms", timeout_ms);
        }

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect_with(opts)
            .await?;

        Ok(Self { pool })
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &Pool<Postgres> {
        &self.pool
    }
}

#[async_trait]
impl MetadataStore for PostgresStore {
    async fn health_check(&self) -> MetadataResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl RepositoryRepo for PostgresStore {
    async fn ensure_schema(&self) -> MetadataResult<()> {
        sqlx::query(POSTGRES_SCHEMA).execute(&self.pool).await?;
        Ok(())
    }

    async fn insert_all(&self, repos: &[Repository]) -> MetadataResult<Vec<Repository>> {
        if repos.is_empty() {
            return Ok(Vec::new());
        }
        for repo in repos {
            repo.validate()?;
        }

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(INSERT_COLUMNS);
        builder.push_values(repos, |mut row, repo| {
            row.push_bind(repo.repo_id)
                .push_bind(&repo.name)
                .push_bind(&repo.description)
                .push_bind(&repo.html_url)
                .push_bind(&repo.homepage)
                .push_bind(repo.tag.clone().map(Json))
                .push_unseparated("::json")
                .push_bind(&repo.created_at)
                .push_bind(&repo.updated_at);
        });
        builder.push(DISPLAY_RETURNING);

        let mut rows: Vec<RepoDisplayRow> = builder.build_query_as().fetch_all(&self.pool).await?;
        // RETURNING has no defined order.
        rows.sort_by_key(|row| row.id);
        let inserted: Vec<Repository> = rows
            .into_iter()
            .map(RepoDisplayRow::into_repository)
            .collect();

        tracing::debug!(repo_count = inserted.len(), "Inserted repositories");
        Ok(inserted)
    }

    async fn select_all(&self) -> MetadataResult<Vec<Repository>> {
        let rows: Vec<RepoRow> = sqlx::query_as(
            r#"
            SELECT id, repo_id, name, description, html_url, homepage, tag, created_at, updated_at
            FROM repos
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(RepoRow::into_repository).collect())
    }

    async fn delete_all(&self) -> MetadataResult<u64> {
        let result = sqlx::query("DELETE FROM repos").execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}
