//! Responses for requests no route accepts, in the same envelope as every other error.

use crate::error::AppError;

pub const NOT_FOUND: &str = "The requested URL was not found on the server.";
pub const METHOD_NOT_ALLOWED: &str = "The method is not allowed for the requested URL.";

/// Router-wide fallback for unknown paths.
pub async fn not_found() -> AppError {
    AppError::NotFound(NOT_FOUND.into())
}

/// Per-route fallback for a known path with an unsupported method.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed(METHOD_NOT_ALLOWED.into())
}
