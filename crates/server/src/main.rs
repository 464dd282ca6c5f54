//! repomirror server binary.

use anyhow::{Context, Result};
use clap::Parser;
use figment::Figment;
use figment::providers::{Env, Format, Toml};
use repomirror_cache::CacheMirror;
use repomirror_core::config::AppConfig;
use repomirror_server::{AppState, create_router};
use repomirror_sync::SyncService;
use repomirror_upstream::GitHubClient;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// repomirror - mirrors repository metadata into a relational store and a cache
#[derive(Parser, Debug)]
#[command(name = "repomirror")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(
        short,
        long,
        env = "REPOMIRROR_CONFIG",
        default_value = "config/repomirror.toml"
    )]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is normal outside development.
    let dotenv_path = dotenvy::dotenv().ok();

    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("repomirror v{}", env!("CARGO_PKG_VERSION"));
    if let Some(path) = dotenv_path {
        tracing::debug!(path = %path.display(), "Loaded environment from .env");
    }

    let config = load_config(&args.config)?;

    repomirror_server::metrics::register_metrics();
    tracing::info!("Prometheus metrics registered");

    // Connecting does not create the repos table; the first read or refresh seeds it.
    let metadata = repomirror_metadata::from_config(&config.metadata)
        .await
        .context("failed to initialize metadata store")?;
    metadata
        .health_check()
        .await
        .context("metadata store health check failed")?;
    tracing::info!("Metadata store initialized");

    let source = GitHubClient::new(&config.upstream).context("failed to build upstream client")?;
    tracing::info!(url = %source.repos_url(), "Upstream client initialized");

    let cache = repomirror_cache::from_config(&config.cache).context("failed to build cache client")?;
    let mirror = CacheMirror::new(cache, config.sync.cache_write_concurrency);

    let sync = SyncService::new(metadata.clone(), Arc::new(source), mirror);
    let state = AppState::new(config.clone(), metadata.clone(), sync);
    let app = create_router(state);

    let addr: SocketAddr = config.server.bind.parse().context("invalid bind address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped, closing metadata store");
    metadata.close().await;
    Ok(())
}

/// Load configuration from the optional TOML file and `REPOMIRROR_` environment variables.
fn load_config(config_path: &str) -> Result<AppConfig> {
    let mut figment = Figment::new();
    let has_config_file = std::path::Path::new(config_path).exists();

    if has_config_file {
        tracing::info!(config_path = %config_path, "Loading configuration from file");
        figment = figment.merge(Toml::file(config_path));
    } else {
        tracing::debug!("No config file found at {}", config_path);
    }

    // REPOMIRROR_CONFIG is just the path, not configuration.
    let has_env_config = std::env::vars()
        .any(|(key, _)| key.starts_with("REPOMIRROR_") && key != "REPOMIRROR_CONFIG");

    if !has_config_file && !has_env_config {
        anyhow::bail!(
            "No configuration provided.\n\n\
             Provide configuration via one of:\n  \
             1. Config file: repomirror --config /path/to/config.toml\n  \
             2. Environment variables: REPOMIRROR_METADATA__TYPE=postgres \
             REPOMIRROR_METADATA__URL=postgres://... REPOMIRROR_CACHE__TYPE=upstash \
             REPOMIRROR_CACHE__URL=... REPOMIRROR_CACHE__TOKEN=... \
             REPOMIRROR_AUTH__EMAIL=... REPOMIRROR_AUTH__PASSWORD=... repomirror\n\n\
             See config/repomirror.example.toml for example configuration."
        );
    }

    let config: AppConfig = figment
        .merge(Env::prefixed("REPOMIRROR_").split("__"))
        .extract()
        .context("failed to load configuration")?;

    config
        .validate()
        .map_err(|e| anyhow::anyhow!("invalid configuration: {e}"))?;
    tracing::info!(config = ?config, "Configuration loaded");
    Ok(config)
}

/// Resolve on Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}
