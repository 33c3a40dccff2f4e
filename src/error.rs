//! Domain error types for the work log server.
//!
//! Uses thiserror for ergonomic error handling with automatic Display implementations.

use actix_web::{HttpResponse, ResponseError};
use std::fmt;

/// Application-level errors.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Database operation failed
    #[error("Database error: {0}")]
    Database(String),

    /// Resource not found
    #[error("{0} not found")]
    NotFound(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Action forbidden by the current work log state
    #[error("{0}")]
    DomainRule(String),

    /// Per-day attachment cap reached
    #[error("{0}")]
    LimitExceeded(String),

    /// Storage (S3) operation failed
    #[error("Storage error: {0}")]
    Storage(String),
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let (status, error_code, response_message) = match self {
            AppError::Database(err_str) => {
                tracing::error!("Database error: {}", err_str);
                (
                    actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "An internal database error occurred".to_string(),
                )
            }
            AppError::NotFound(_) => (
                actix_web::http::StatusCode::NOT_FOUND,
                "NOT_FOUND",
                self.to_string(),
            ),
            AppError::InvalidInput(_) => (
                actix_web::http::StatusCode::BAD_REQUEST,
                "INVALID_INPUT",
                self.to_string(),
            ),
            AppError::DomainRule(_) => (
                actix_web::http::StatusCode::BAD_REQUEST,
                "DOMAIN_RULE",
                self.to_string(),
            ),
            AppError::LimitExceeded(_) => (
                actix_web::http::StatusCode::BAD_REQUEST,
                "LIMIT_EXCEEDED",
                self.to_string(),
            ),
            AppError::Storage(err_str) => {
                tracing::error!("Storage error: {}", err_str);
                (
                    actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                    "STORAGE_ERROR",
                    "An internal storage error occurred".to_string(),
                )
            }
        };

        HttpResponse::build(status).json(ErrorResponse {
            error: error_code.to_string(),
            message: response_message,
        })
    }
}

/// Error response body matching OpenAPI schema.
#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

// Conversion implementations for common error types

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidInput(format!("JSON parsing error: {}", err))
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        AppError::Database(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_not_found_maps_to_404() {
        let err = AppError::NotFound("WorkLog 42".to_string());
        assert_eq!(err.error_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_client_faults_map_to_400() {
        let errors = [
            AppError::InvalidInput("sales_count must be zero or greater".to_string()),
            AppError::DomainRule("Cannot record sales on an off day".to_string()),
            AppError::LimitExceeded("Up to 3 photos can be attached per day".to_string()),
        ];
        for err in errors {
            assert_eq!(err.error_response().status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn test_infrastructure_faults_map_to_500() {
        let db = AppError::Database("connection refused".to_string());
        let storage = AppError::Storage("bucket unavailable".to_string());
        assert_eq!(
            db.error_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            storage.error_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_limit_exceeded_keeps_user_facing_message() {
        let err = AppError::LimitExceeded("Up to 3 photos can be attached per day".to_string());
        assert_eq!(err.to_string(), "Up to 3 photos can be attached per day");
    }

    #[actix_web::test]
    async fn test_infrastructure_faults_hide_internal_detail() {
        for err in [
            AppError::Database("connection refused to 10.0.0.5".to_string()),
            AppError::Storage("dispatch failure: connect timeout".to_string()),
        ] {
            let resp = err.error_response();
            let body = actix_web::body::to_bytes(resp.into_body()).await.unwrap();
            let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

            let message = json["message"].as_str().unwrap();
            assert!(!message.contains("10.0.0.5"));
            assert!(!message.contains("connect timeout"));
        }
    }
}
