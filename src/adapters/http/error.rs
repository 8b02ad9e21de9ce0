//! Shared HTTP error response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::ports::RepositoryError;

/// JSON error body for every non-2xx API response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Maps repository failures onto HTTP statuses.
///
/// Database details are traced, never echoed back to the caller.
pub fn repository_error_response(err: RepositoryError) -> Response {
    match err {
        RepositoryError::NotFound { .. } => {
            (StatusCode::NOT_FOUND, Json(ErrorResponse::new(err.to_string()))).into_response()
        }
        RepositoryError::Duplicate { .. } => {
            (StatusCode::CONFLICT, Json(ErrorResponse::new(err.to_string()))).into_response()
        }
        RepositoryError::Database(detail) => {
            tracing::error!(error = %detail, "repository failure");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("internal error")),
            )
                .into_response()
        }
    }
}
