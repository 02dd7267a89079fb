use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use enroll_core::error::CoreError;
use serde_json::json;

/// Message returned when the store rejects an insert.
pub const SAVE_FAILED_MESSAGE: &str = "Failed to save registration";

/// Message returned for any other fault inside the handler boundary.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds storage and internal
/// variants. Implements [`IntoResponse`] to produce `{ "error", "code" }`
/// JSON bodies; storage and internal details are logged, never returned.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `enroll_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The store failed to persist the registration.
    #[error("Persistence error: {0}")]
    Persistence(#[from] sqlx::Error),

    /// Anything else: undecodable payloads, panics, unexpected faults.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(CoreError::MissingField(_)) => {
                (StatusCode::BAD_REQUEST, "MISSING_FIELD", self.to_string())
            }
            AppError::Persistence(err) => {
                tracing::error!(error = %err, "Failed to persist registration");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "PERSISTENCE_ERROR",
                    SAVE_FAILED_MESSAGE.to_string(),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
