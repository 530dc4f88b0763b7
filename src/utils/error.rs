//! Error Handling Utilities
//!
//! Application error taxonomy and the standard JSON error envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Main application error type that can represent errors from any feature
#[derive(Error, Debug)]
pub enum AppError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Validation errors for user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Missing, malformed, or expired credentials
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Resource not found errors
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Conflict errors (e.g., duplicate username)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Policy violations, such as the wrong account kind attempting an operation
    #[error("Policy violation: {0}")]
    Policy(String),

    /// Configuration errors (e.g., missing signing secret)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Generic internal server errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error payload carried inside the standard response envelope
#[derive(Serialize, Debug)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

/// Standard error envelope for API endpoints: `{success: false, error: {code, message}}`
#[derive(Serialize, Debug)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorBody,
}

impl ErrorResponse {
    pub fn new(code: &str, message: &str) -> Self {
        Self {
            success: false,
            error: ErrorBody {
                code: code.to_string(),
                message: message.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            AppError::Database(ref e) => {
                log::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            // Duplicate-resource conflicts render as 400, matching the
            // envelope contract clients already handle.
            AppError::Conflict(msg) => (StatusCode::BAD_REQUEST, "CONFLICT", msg),
            AppError::Policy(msg) => (StatusCode::FORBIDDEN, "POLICY_ERROR", msg),
            AppError::Configuration(ref e) => {
                log::error!("Configuration error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "CONFIGURATION_ERROR",
                    "Server configuration error".to_string(),
                )
            }
            AppError::Internal(ref e) => {
                log::error!("Internal error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Something went wrong".to_string(),
                )
            }
        };

        let error_response = ErrorResponse::new(error_code, &message);
        (status, Json(error_response)).into_response()
    }
}

/// Result type alias for operations that can return AppError
pub type AppResult<T> = Result<T, AppError>;
