//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in QuoteDesk                              │
//! │                                                                         │
//! │  Handler: Result<T, ApiError>                                          │
//! │       │                                                                 │
//! │       ├── JSON / path rejection ─────────┐                              │
//! │       ├── CoreError (validation, 404) ───┤                              │
//! │       └── DbError (store failures) ──────┤                              │
//! │                                          ▼                              │
//! │                                       ApiError ──► status + JSON body   │
//! │                                                                         │
//! │  { "error": "not_found", "message": "Quote not found: 12" }            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Store failures that are not the client's fault are logged here and
//! reported with a generic message.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::json;

use quotedesk_core::CoreError;
use quotedesk_db::DbError;

/// API error returned from handlers.
#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Input validation failed (400)
    ValidationError,

    /// Resource not found (404)
    NotFound,

    /// A referenced catalog item does not exist (422)
    InvalidReference,

    /// Database operation failed (500)
    DatabaseError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "validation_error",
            ErrorCode::NotFound => "not_found",
            ErrorCode::InvalidReference => "invalid_reference",
            ErrorCode::DatabaseError => "database_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::InvalidReference => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorCode::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn database(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::DatabaseError, message)
    }
}

/// Renders `{"error": <code>, "message": <text>}` with the given status.
pub fn json_error(status: StatusCode, code: &'static str, message: impl Into<String>) -> Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        json_error(self.code.status(), self.code.as_str(), self.message)
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        if err.is_client_error() {
            tracing::debug!("Request rejected by store: {}", err);
        }

        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, id),
            DbError::ForeignKeyViolation { message } => {
                ApiError::new(ErrorCode::InvalidReference, message)
            }
            DbError::ConstraintViolation(message) => ApiError::validation(message),
            DbError::ConnectionFailed(e) => {
                tracing::error!("Database connection failed: {}", e);
                ApiError::database("Database connection failed")
            }
            DbError::MigrationFailed(e) => {
                tracing::error!("Database migration failed: {}", e);
                ApiError::database("Database migration failed")
            }
            DbError::QueryFailed(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Database query failed: {}", e);
                ApiError::database("Database operation failed")
            }
            DbError::TransactionFailed(e) => {
                tracing::error!("Transaction failed: {}", e);
                ApiError::database("Database transaction failed")
            }
            DbError::PoolExhausted => ApiError::database("Database pool exhausted"),
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                ApiError::database("Database operation failed")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::QuoteNotFound(id) => ApiError::not_found("Quote", id),
            CoreError::ItemNotFound(id) => ApiError::not_found("Item", id),
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quotedesk_core::ValidationError;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ErrorCode::ValidationError, StatusCode::BAD_REQUEST),
            (ErrorCode::NotFound, StatusCode::NOT_FOUND),
            (ErrorCode::InvalidReference, StatusCode::UNPROCESSABLE_ENTITY),
            (ErrorCode::DatabaseError, StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (code, status) in cases {
            assert_eq!(code.status(), status);
            assert_eq!(ApiError::new(code, "x").into_response().status(), status);
        }
    }

    #[test]
    fn test_from_db_error() {
        let err = ApiError::from(DbError::not_found("Quote", 7));
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Quote not found: 7");

        let err = ApiError::from(DbError::missing_reference("Item", 3));
        assert_eq!(err.code, ErrorCode::InvalidReference);

        let err = ApiError::from(DbError::QueryFailed("syntax error near SELEC".into()));
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(!err.message.contains("SELEC"));
    }

    #[test]
    fn test_from_core_error() {
        let err = ApiError::from(CoreError::from(ValidationError::required("recipient_name")));
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "recipient_name is required");

        let err = ApiError::from(CoreError::ItemNotFound(5));
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_error_code_serializes_snake_case() {
        let value = serde_json::to_value(ErrorCode::InvalidReference).unwrap();
        assert_eq!(value, "invalid_reference");
    }
}
