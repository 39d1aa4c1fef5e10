//!
//! # Custom Error Handling
//!
//! This module defines the error type `AppError` used throughout the service.
//! Every failure a handler can produce maps to exactly one variant, and every
//! variant maps to exactly one HTTP status.
//!
//! `AppError` implements `actix_web::error::ResponseError`, so handlers can return
//! `Result<_, AppError>` and extractors can fail with it. Failures are answered with
//! a `{"message": "..."}` JSON body. Server-side failures (500) carry a generic
//! message; their detail goes to the log instead of the client.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::ValidationErrors;

/// Represents all possible errors that can occur within the application.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed or out-of-range input (HTTP 400).
    #[error("Validation Error: {0}")]
    Validation(String),
    /// The requested resource does not exist (HTTP 404).
    #[error("Not Found: {0}")]
    NotFound(String),
    /// Bad credentials, or a missing, invalid or expired bearer token (HTTP 401).
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    /// The backing store failed (HTTP 500).
    #[error("Storage Error: {0}")]
    Storage(String),
    /// A token could not be issued (HTTP 500).
    #[error("Signing Error: {0}")]
    Signing(String),
    /// Any other unexpected server-side failure, e.g. password hashing (HTTP 500).
    #[error("Internal Server Error: {0}")]
    Internal(String),
    /// The request did not complete within the configured deadline (HTTP 503).
    #[error("Request Timeout: {0}")]
    Timeout(String),
}

/// Body of every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Storage(_) | AppError::Signing(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Timeout(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AppError::Validation(msg)
            | AppError::NotFound(msg)
            | AppError::Unauthorized(msg)
            | AppError::Timeout(msg) => msg.clone(),
            AppError::Storage(_) | AppError::Signing(_) | AppError::Internal(_) => {
                log::error!("{}", self);
                "Internal server error".to_string()
            }
        };
        HttpResponse::build(self.status_code()).json(ErrorResponse { message })
    }
}

/// `RowNotFound` becomes `AppError::NotFound`; everything else the store reports is a
/// storage failure.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            _ => AppError::Storage(error.to_string()),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::Validation(error.to_string())
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::Internal(error.to_string())
    }
}
