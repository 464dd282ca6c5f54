//! Repository list, refresh trigger, and page-load data.

use crate::error::ApiResult;
use crate::metrics;
use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use repomirror_core::Repository;
use serde::Serialize;

/// Page-load payload for the tools page.
#[derive(Debug, Serialize)]
pub struct ToolsResponse {
    pub result: Vec<Repository>,
}

async fn fetch_all(state: &AppState) -> ApiResult<Vec<Repository>> {
    match state.sync.fetch_all().await {
        Ok(repos) => {
            metrics::REPO_READS.inc();
            Ok(repos)
        }
        Err(err) => {
            metrics::record_sync_failure("fetch_all");
            Err(err.into())
        }
    }
}

/// GET /api/repos
pub async fn list_repos(State(state): State<AppState>) -> ApiResult<Json<Vec<Repository>>> {
    Ok(Json(fetch_all(&state).await?))
}

/// POST /api/repos
///
/// Deletes every stored row and reseeds from upstream. The body is ignored.
pub async fn refresh_repos(State(state): State<AppState>) -> ApiResult<StatusCode> {
    let timer = metrics::REFRESH_DURATION.start_timer();
    let result = state.sync.refresh().await;
    timer.observe_duration();

    match result {
        Ok(repos) => {
            metrics::REFRESHES.inc();
            tracing::info!(repo_count = repos.len(), "Refresh complete");
            Ok(StatusCode::OK)
        }
        Err(err) => {
            metrics::record_sync_failure("refresh");
            Err(err.into())
        }
    }
}

/// GET /tools
pub async fn tools_page(State(state): State<AppState>) -> ApiResult<Json<ToolsResponse>> {
    Ok(Json(ToolsResponse {
        result: fetch_all(&state).await?,
    }))
}
