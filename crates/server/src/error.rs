//! API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use repomirror_metadata::MetadataError;
use repomirror_sync::SyncError;
use serde::Serialize;

/// API error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

/// API error type.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Sync(#[from] SyncError),

    #[error("metadata error: {0}")]
    Metadata(#[from] MetadataError),
}

impl ApiError {
    /// Get the error code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Sync(SyncError::Upstream(_)) => "upstream_error",
            Self::Sync(SyncError::Cache(_)) => "cache_error",
            Self::Sync(SyncError::Metadata(e)) | Self::Metadata(e) => {
                if e.is_schema_missing() {
                    "schema_missing"
                } else {
                    "metadata_error"
                }
            }
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Sync(SyncError::Upstream(_)) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        tracing::error!(code = self.code(), error = %self, "Request failed");
        let body = ErrorResponse {
            code: self.code().to_string(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers.
pub type ApiResult<T> = std::result::Result<T, ApiError>;
