// crates/backend-lib/src/error.rs

//! Central error type + Axum integration.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::validation::ValidationError;

/// Application error types, returned as typed outcomes from the account
/// lifecycle service and mapped to fixed HTTP statuses here.
///
/// `InvalidCredentials` deliberately covers both "no such account" and
/// "wrong password" so responses never reveal whether an email is
/// registered.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("User with this email already exists.")]
    AlreadyExists,

    #[error("User not found. Please sign up first.")]
    NotFound,

    #[error("Invalid verification code")]
    InvalidCode,

    #[error("Invalid email or password.")]
    InvalidCredentials,

    #[error("Account not verified. Please check your email for the OTP.")]
    NotVerified,

    #[error("Failed to send verification email: {0}")]
    NotificationFailed(String),

    #[error("Account store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::AlreadyExists => StatusCode::CONFLICT,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::InvalidCode | AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::NotVerified => StatusCode::FORBIDDEN,
            AppError::NotificationFailed(_)
            | AppError::StoreUnavailable(_)
            | AppError::Json(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get a sanitized detail string suitable for production use
    pub fn sanitized_details(&self) -> String {
        match self {
            AppError::NotificationFailed(_) => "Verification email delivery failed".to_string(),
            AppError::StoreUnavailable(_) => "Account store unavailable".to_string(),
            _ => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match &self {
            // Signup conflict uses the `error` key, matching the public API
            AppError::AlreadyExists => serde_json::json!({ "error": self.to_string() }),
            AppError::NotVerified => serde_json::json!({
                "message": self.to_string(),
                "needsVerification": true,
            }),
            AppError::NotFound
            | AppError::InvalidCode
            | AppError::InvalidCredentials
            | AppError::InvalidInput(_) => serde_json::json!({ "message": self.to_string() }),
            _ => {
                // Use detailed messages in development, sanitized in production
                let details = if cfg!(debug_assertions) {
                    self.to_string()
                } else {
                    self.sanitized_details()
                };
                serde_json::json!({
                    "error": "An internal server error occurred.",
                    "details": details,
                })
            },
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError::Internal(msg)
    }
}

impl From<&str> for AppError {
    fn from(msg: &str) -> Self {
        AppError::Internal(msg.to_string())
    }
}
