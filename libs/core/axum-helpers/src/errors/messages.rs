//! Standard error labels and messages for consistent error responses.

// Error labels surfaced in the envelope's `error` field
pub const VALIDATION_ERROR: &str = "Validation Error";
pub const BAD_REQUEST: &str = "Bad Request";
pub const NOT_FOUND: &str = "Resource Not Found";
pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";
pub const METHOD_NOT_ALLOWED: &str = "Method Not Allowed";

// Message constants
pub const VALIDATION_FAILED: &str = "Validation failed for the provided input.";
pub const INVALID_UUID: &str = "Invalid UUID format.";
pub const NOT_FOUND_RESOURCE: &str = "The requested resource was not found.";
pub const INTERNAL_ERROR: &str = "An unexpected error occurred.";
