pub mod handlers;
pub mod messages;
pub mod responses;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Error as UuidError;
use validator::ValidationErrors;

/// Uniform error envelope returned on every failure.
///
/// # JSON Example
///
/// ```json
/// {
///   "status": 404,
///   "error": "Resource Not Found",
///   "message": "Product 0193a9e2-... not found"
/// }
/// ```
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    /// HTTP status code, repeated in the body for client convenience
    pub status: u16,
    /// Human-readable error label (e.g. "Validation Error")
    pub error: String,
    /// Descriptive error message
    pub message: String,
}

/// Select the single message surfaced for a failed validation.
///
/// Only the first violated rule is reported, never an aggregate. Field names
/// are sorted before picking so the chosen violation is deterministic
/// regardless of hash-map iteration order.
pub fn first_violation(errors: &ValidationErrors) -> String {
    let field_errors = errors.field_errors();
    let mut fields: Vec<_> = field_errors.keys().collect();
    fields.sort();

    fields
        .first()
        .and_then(|field| field_errors.get(*field))
        .and_then(|errs| errs.first())
        .map(|err| match &err.message {
            Some(message) => message.to_string(),
            None => err.code.to_string(),
        })
        .unwrap_or_else(|| messages::VALIDATION_FAILED.to_string())
}

/// Application error type that can be converted to HTTP responses.
///
/// This is the only place where failures become status codes; services below
/// the transport boundary raise their own typed errors and convert into
/// `AppError` at the edge.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("UUID error: {0}")]
    UuidError(#[from] UuidError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            AppError::JsonExtractorRejection(e) => {
                tracing::warn!("JSON extraction error: {:?}", e);
                (e.status(), messages::BAD_REQUEST, e.body_text())
            }
            AppError::ValidationError(e) => {
                tracing::info!("Validation error: {:?}", e);
                (
                    StatusCode::BAD_REQUEST,
                    messages::VALIDATION_ERROR,
                    first_violation(&e),
                )
            }
            AppError::UuidError(e) => {
                tracing::warn!("UUID error: {:?}", e);
                (
                    StatusCode::BAD_REQUEST,
                    messages::BAD_REQUEST,
                    messages::INVALID_UUID.to_string(),
                )
            }
            AppError::Validation(msg) => {
                tracing::info!("Validation error: {}", msg);
                (StatusCode::BAD_REQUEST, messages::VALIDATION_ERROR, msg)
            }
            AppError::BadRequest(msg) => {
                tracing::info!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, messages::BAD_REQUEST, msg)
            }
            AppError::NotFound(msg) => {
                tracing::info!("Not found: {}", msg);
                (StatusCode::NOT_FOUND, messages::NOT_FOUND, msg)
            }
            AppError::InternalServerError(msg) => {
                // Detail is logged, never leaked to the client.
                tracing::error!("Internal server error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    messages::INTERNAL_SERVER_ERROR,
                    messages::INTERNAL_ERROR.to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            status: status.as_u16(),
            error: error.to_string(),
            message,
        });

        (status, body).into_response()
    }
}
