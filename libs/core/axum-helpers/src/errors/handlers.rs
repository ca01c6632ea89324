use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::{ErrorResponse, messages};

/// Handler for 404 Not Found errors.
///
/// This can be used as a fallback handler in your router.
pub async fn not_found() -> Response {
    let body = Json(ErrorResponse {
        status: StatusCode::NOT_FOUND.as_u16(),
        error: messages::NOT_FOUND.to_string(),
        message: messages::NOT_FOUND_RESOURCE.to_string(),
    });

    (StatusCode::NOT_FOUND, body).into_response()
}

/// Handler for 405 Method Not Allowed errors.
pub async fn method_not_allowed() -> Response {
    let body = Json(ErrorResponse {
        status: StatusCode::METHOD_NOT_ALLOWED.as_u16(),
        error: messages::METHOD_NOT_ALLOWED.to_string(),
        message: "The HTTP method is not allowed for this resource.".to_string(),
    });

    (StatusCode::METHOD_NOT_ALLOWED, body).into_response()
}
