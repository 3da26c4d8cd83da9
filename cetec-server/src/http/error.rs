//! API error type with IntoResponse
//!
//! Every failure becomes `{"error": "<message>"}`; the status code is the
//! signal clients should branch on.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tower::timeout::error::Elapsed;
use tower::BoxError;

use crate::db::{CreatePersonError, StoreError};

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// No joined profile row, or the read failed (404)
    NotFound,

    /// Request body did not deserialize (400)
    InvalidInput,

    /// A step of the create transaction failed and was rolled back (500)
    CreateFailed(CreatePersonError),

    /// The request outlived the configured timeout (408)
    Timeout,

    /// Middleware failure outside the handlers (500)
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::NotFound => (StatusCode::NOT_FOUND, "no record found"),
            Self::InvalidInput => (StatusCode::BAD_REQUEST, "Invalid input data"),
            Self::CreateFailed(e) => {
                tracing::error!(stage = ?e.stage, error = %e.source, "person creation failed");
                (StatusCode::INTERNAL_SERVER_ERROR, e.stage.message())
            }
            Self::Timeout => (StatusCode::REQUEST_TIMEOUT, "request timed out"),
            Self::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "internal error"),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Read failures all collapse to 404; the cause is only logged.
impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound { id } => tracing::debug!(person_id = id, "no profile row"),
            StoreError::Sqlx(e) => tracing::warn!(error = %e, "profile query failed"),
        }
        Self::NotFound
    }
}

impl From<CreatePersonError> for ApiError {
    fn from(e: CreatePersonError) -> Self {
        Self::CreateFailed(e)
    }
}

/// Turn errors from the middleware stack into the JSON error shape.
pub async fn handle_middleware_error(err: BoxError) -> ApiError {
    if err.is::<Elapsed>() {
        tracing::warn!("request timed out");
        ApiError::Timeout
    } else {
        tracing::error!(error = %err, "unhandled middleware error");
        ApiError::Internal
    }
}
