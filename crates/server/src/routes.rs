//! Route configuration.

use crate::handlers;
use crate::metrics::metrics_handler;
use crate::state::AppState;
use crate::trace::trace_id_middleware;
use axum::Router;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route(
            "/api/repos",
            get(handlers::list_repos).post(handlers::refresh_repos),
        )
        .route("/tools", get(handlers::tools_page))
        .route("/login", post(handlers::login))
        // Health check, unauthenticated for load balancers
        .route("/v1/health", get(handlers::health_check));

    // The metrics endpoint should be network-restricted to the scraper.
    if state.config.server.metrics_enabled {
        router = router.route("/metrics", get(metrics_handler));
    }

    router
        .layer(middleware::from_fn(trace_id_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
