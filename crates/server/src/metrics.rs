//! Prometheus metrics for the repomirror server.
//!
//! The `/metrics` endpoint is unauthenticated so Prometheus can scrape it.
//! Metrics carry no repository data, only aggregate counts.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use prometheus::{
    self, Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry,
    TextEncoder,
};
use std::sync::{LazyLock, Once};

/// Global Prometheus registry for all metrics.
pub static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

pub static REPO_READS: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "repomirror_repo_reads_total",
        "Total number of repository list reads served",
    )
    .expect("metric creation failed")
});

pub static REFRESHES: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "repomirror_refreshes_total",
        "Total number of completed full resyncs",
    )
    .expect("metric creation failed")
});

pub static SYNC_FAILURES: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        Opts::new(
            "repomirror_sync_failures_total",
            "Total sync pipeline failures by operation",
        ),
        &["operation"],
    )
    .expect("metric creation failed")
});

pub static LOGIN_ATTEMPTS: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        Opts::new(
            "repomirror_login_attempts_total",
            "Total login attempts by outcome",
        ),
        &["outcome"],
    )
    .expect("metric creation failed")
});

pub static REFRESH_DURATION: LazyLock<Histogram> = LazyLock::new(|| {
    Histogram::with_opts(
        HistogramOpts::new(
            "repomirror_refresh_duration_seconds",
            "Time taken by a full resync, including the upstream fetch",
        )
        .buckets(vec![0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
    )
    .expect("metric creation failed")
});

static REGISTER_ONCE: Once = Once::new();

/// Register all metrics with the global registry. Safe to call more than once.
pub fn register_metrics() {
    REGISTER_ONCE.call_once(|| {
        REGISTRY
            .register(Box::new(REPO_READS.clone()))
            .expect("metric registration failed");
        REGISTRY
            .register(Box::new(REFRESHES.clone()))
            .expect("metric registration failed");
        REGISTRY
            .register(Box::new(SYNC_FAILURES.clone()))
            .expect("metric registration failed");
        REGISTRY
            .register(Box::new(LOGIN_ATTEMPTS.clone()))
            .expect("metric registration failed");
        REGISTRY
            .register(Box::new(REFRESH_DURATION.clone()))
            .expect("metric registration failed");
    });
}

/// Prometheus text exposition.
pub async fn metrics_handler() -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();

    let mut buffer = Vec::new();
    match encoder.encode(&metric_families, &mut buffer) {
        Ok(()) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
            buffer,
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            [("content-type", "text/plain; charset=utf-8")],
            format!("Failed to encode metrics: {e}").into_bytes(),
        ),
    }
}

/// Count a failed sync operation (`fetch_all`, `refresh`).
pub fn record_sync_failure(operation: &str) {
    SYNC_FAILURES.with_label_values(&[operation]).inc();
}

/// Count a login attempt (`accepted`, `rejected`).
pub fn record_login(outcome: &str) {
    LOGIN_ATTEMPTS.with_label_values(&[outcome]).inc();
}
