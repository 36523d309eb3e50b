use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use leadpipe_core::error::LeadError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`LeadError`] and implements [`IntoResponse`] to produce
/// consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `leadpipe_core`.
    #[error(transparent)]
    Lead(#[from] LeadError),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Lead(lead) => match lead {
                LeadError::Validation { field, message } => (
                    StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    format!("{field}: {message}"),
                ),
                LeadError::NotFound(id) => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("lead with id {id} not found"),
                ),
                LeadError::DuplicateId(id) => (
                    StatusCode::CONFLICT,
                    "CONFLICT",
                    format!("lead id {id} already exists"),
                ),
                LeadError::InvalidTransition { from, to } => (
                    StatusCode::CONFLICT,
                    "CONFLICT",
                    format!("cannot move a {from} lead to {to}"),
                ),
                LeadError::Store(msg) => {
                    tracing::error!(error = %msg, "Store error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
