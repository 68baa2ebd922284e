//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes and JSON bodies.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Application-wide error type.
///
/// This enum represents all possible errors that can occur in the application.
/// Each variant maps to a specific HTTP status code and error message.
///
/// # Error Categories
///
/// - **Validation Errors**: Malformed or missing request input
/// - **Resource Errors**: Requested id has no matching row
/// - **Integrity Errors**: Duplicate keys, missing foreign-key targets, deletes blocked by dependents
/// - **Database Errors**: Anything else sqlx reports
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Request body or parameters are invalid.
    ///
    /// Returns HTTP 400 Bad Request.
    /// The String contains details about what was invalid.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The requested row does not exist.
    ///
    /// Returns HTTP 404 Not Found. The inner value names the entity
    /// (`"customer"`, `"product"`, ...) so the message reads naturally.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// The store rejected a write: duplicate primary key, missing
    /// foreign-key target, or a delete blocked by a dependent row.
    ///
    /// Returns HTTP 409 Conflict with the store's own message.
    #[error("Integrity violation: {0}")]
    Integrity(String),

    /// Database operation failed (e.g., connection error, query error).
    ///
    /// Returns HTTP 500; the underlying error is logged server-side and
    /// hidden from the caller.
    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

/// Classify sqlx errors into the application taxonomy.
///
/// Constraint violations (unique/primary key, foreign key, not-null,
/// check) become [`AppError::Integrity`] so the caller sees a 409 with the
/// store's message. Everything else stays an opaque database error.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            use sqlx::error::ErrorKind;

            match db_err.kind() {
                ErrorKind::UniqueViolation
                | ErrorKind::ForeignKeyViolation
                | ErrorKind::NotNullViolation
                | ErrorKind::CheckViolation => {
                    return AppError::Integrity(db_err.message().to_string());
                }
                _ => {}
            }
        }

        AppError::Database(err)
    }
}

/// Convert AppError into an HTTP response.
///
/// This implementation allows Axum handlers to return `Result<T, AppError>`
/// and have errors automatically converted to proper HTTP responses.
///
/// # Response Format
///
/// All errors return JSON in this format:
/// ```json
/// {
///   "error": {
///     "code": "error_type",
///     "message": "Human-readable error message"
///   }
/// }
/// ```
///
/// # Status Code Mapping
///
/// - `InvalidRequest` → 400 Bad Request
/// - `NotFound` → 404 Not Found
/// - `Integrity` → 409 Conflict
/// - `Database` → 500 Internal Server Error (hides details from client)
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Map each error variant to (HTTP status, error code, message)
        let (status, code, message) = match self {
            AppError::InvalidRequest(ref msg) => {
                (StatusCode::BAD_REQUEST, "invalid_request", msg.clone())
            }
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found", self.to_string()),
            AppError::Integrity(ref msg) => {
                (StatusCode::CONFLICT, "integrity_violation", msg.clone())
            }
            AppError::Database(ref err) => {
                tracing::error!(error = %err, "unexpected database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        // Build JSON response body
        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        // Return the response with status code and JSON body
        (status, body).into_response()
    }
}
