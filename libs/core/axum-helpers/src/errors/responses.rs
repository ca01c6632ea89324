//! Reusable OpenAPI response types for consistent API documentation.

use super::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Validation Error",
    content_type = "application/json",
    example = json!({
        "status": 400,
        "error": "Validation Error",
        "message": "Product name cannot be blank"
    })
)]
pub struct ValidationErrorResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request",
    content_type = "application/json",
    example = json!({
        "status": 400,
        "error": "Bad Request",
        "message": "Product with the same name already exists"
    })
)]
pub struct BadRequestResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({
        "status": 404,
        "error": "Resource Not Found",
        "message": "The requested resource was not found."
    })
)]
pub struct NotFoundResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({
        "status": 500,
        "error": "Internal Server Error",
        "message": "An unexpected error occurred."
    })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);
