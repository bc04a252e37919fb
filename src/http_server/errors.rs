//! # HTTP Errors
//!
//! Every failed request becomes `{"error": "<message>"}` with a status code
//! chosen by the error kind. Store error text is passed through verbatim.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

use crate::employee::ValidationErrors;
use crate::store::StoreError;

/// Result type for handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// HTTP API errors
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Body is not a decodable employee
    #[error("Invalid request payload: {0}")]
    InvalidPayload(String),

    /// Body decoded but failed field validation
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    // ==================
    // Store Errors
    // ==================
    /// Store operation failed; status depends on the store error
    #[error("Failed to {action}: {source}")]
    Store {
        action: &'static str,
        source: StoreError,
    },
}

impl ApiError {
    pub fn store(action: &'static str) -> impl FnOnce(StoreError) -> Self {
        move |source| ApiError::Store { action, source }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Store { source, .. } => match source {
                StoreError::InvalidId(_) => StatusCode::BAD_REQUEST,
                StoreError::NotFound(_) => StatusCode::NOT_FOUND,
                StoreError::Connection(_)
                | StoreError::Query { .. }
                | StoreError::LockPoisoned => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<ApiError> for ErrorResponse {
    fn from(err: ApiError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %self, "request failed");
        } else {
            warn!(status = status.as_u16(), error = %self, "request rejected");
        }

        let body = Json(ErrorResponse::from(self));
        (status, body).into_response()
    }
}
