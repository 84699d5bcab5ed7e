//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Error Flow to the Client                           │
//! │                                                                         │
//! │  Repository                           Handler                           │
//! │  ──────────                           ───────                           │
//! │                                                                         │
//! │  DbError::Domain(EmptyCart)     ───►  400 VALIDATION / CART_ERROR       │
//! │  DbError::Domain(ProductNotFound)──►  404 NOT_FOUND                     │
//! │  DbError::NotFound              ───►  404 NOT_FOUND                     │
//! │  DbError::Domain(InsufficientStock)─► 500 INSUFFICIENT_STOCK            │
//! │                                       (descriptive, client shows it)    │
//! │  other DbError                  ───►  500 DATABASE_ERROR                │
//! │                                       (generic, details only in logs)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Response Shape
//! ```json
//! { "code": "INSUFFICIENT_STOCK", "message": "Insufficient stock for ..." }
//! ```

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use warung_core::CoreError;
use warung_db::DbError;

/// API error returned as a JSON body with an HTTP status.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// Cart cannot be processed as submitted (400)
    CartError,

    /// Not enough stock to complete the sale (500)
    InsufficientStock,

    /// Database operation failed (500)
    DatabaseError,

    /// Internal server error (500)
    Internal,
}

impl ErrorCode {
    /// HTTP status this code maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ValidationError | ErrorCode::CartError => StatusCode::BAD_REQUEST,
            ErrorCode::InsufficientStock
            | ErrorCode::DatabaseError
            | ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.code.status(), Json(self)).into_response()
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::EmptyCart => ApiError::new(ErrorCode::CartError, err.to_string()),
            CoreError::CartTooLarge { .. } => ApiError::new(ErrorCode::CartError, err.to_string()),
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", id),
            // The original client surfaces these verbatim, so keep the
            // descriptive message even though the status is 500.
            CoreError::InsufficientStock { .. } | CoreError::StockRace { .. } => {
                ApiError::new(ErrorCode::InsufficientStock, err.to_string())
            }
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Domain(core) => core.into(),
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, id),
            DbError::ForeignKeyViolation { message } => {
                tracing::error!("Foreign key violation: {}", message);
                ApiError::new(ErrorCode::ValidationError, "Invalid reference")
            }
            DbError::ConnectionFailed(_) | DbError::PoolExhausted => {
                tracing::error!("Database unavailable: {}", err);
                ApiError::new(ErrorCode::DatabaseError, "Database unavailable")
            }
            DbError::MigrationFailed(e) | DbError::QueryFailed(e) | DbError::Internal(e) => {
                tracing::error!("Database operation failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ErrorCode::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::ValidationError.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::CartError.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ErrorCode::InsufficientStock.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_insufficient_stock_keeps_message() {
        let api: ApiError = CoreError::InsufficientStock {
            product: "Indomie Goreng".to_string(),
            available: 2,
            requested: 3,
        }
        .into();
        assert_eq!(api.code, ErrorCode::InsufficientStock);
        assert!(api.message.contains("Indomie Goreng"));
        assert!(api.message.contains("available 2"));
    }

    #[test]
    fn test_query_failure_is_generic() {
        let api: ApiError = DbError::QueryFailed("secret table detail".to_string()).into();
        assert_eq!(api.code, ErrorCode::DatabaseError);
        assert!(!api.message.contains("secret"));
    }

    #[test]
    fn test_empty_cart_is_bad_request() {
        let api: ApiError = DbError::Domain(CoreError::EmptyCart).into();
        assert_eq!(api.code.status(), StatusCode::BAD_REQUEST);
    }
}
