// ============================
// signup-backend-lib/src/validation/mod.rs
// ============================
//! Request input validation.

use crate::auth::password::meets_requirements;
use crate::config::PasswordRequirements;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

// Common validation constants
const MAX_PASSWORD_LENGTH: usize = 128;
const MAX_DISPLAY_NAME_LENGTH: usize = 100;
const MAX_EMAIL_LENGTH: usize = 254; // RFC 5321 SMTP limit

// Regex patterns for validation
static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap());
static DISPLAY_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^<>/\\{}()\[\];]*$").unwrap());

/// Possible validation errors
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    #[error("Invalid password: {0}")]
    InvalidPassword(String),

    #[error("Invalid name: {0}")]
    InvalidDisplayName(String),
}

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validate an email address
pub fn validate_email(email: &str) -> ValidationResult<&str> {
    if email.is_empty() {
        return Err(ValidationError::InvalidEmail(
            "Email address cannot be empty".to_string(),
        ));
    }

    if email.len() > MAX_EMAIL_LENGTH {
        return Err(ValidationError::InvalidEmail(format!(
            "Email address cannot exceed {MAX_EMAIL_LENGTH} characters"
        )));
    }

    if !EMAIL_REGEX.is_match(email) {
        return Err(ValidationError::InvalidEmail(
            "Invalid email address format".to_string(),
        ));
    }

    Ok(email)
}

/// Validate a password against the configured policy
pub fn validate_password<'a>(
    password: &'a str,
    requirements: &PasswordRequirements,
) -> ValidationResult<&'a str> {
    if password.is_empty() {
        return Err(ValidationError::InvalidPassword(
            "Password must not be empty".to_string(),
        ));
    }

    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(ValidationError::InvalidPassword(format!(
            "Password cannot exceed {MAX_PASSWORD_LENGTH} characters"
        )));
    }

    if !meets_requirements(password, requirements) {
        return Err(ValidationError::InvalidPassword(format!(
            "Password must be at least {} characters and meet the configured complexity policy",
            requirements.min_length
        )));
    }

    Ok(password)
}

/// Validate a display name
pub fn validate_display_name(name: &str) -> ValidationResult<&str> {
    if name.is_empty() {
        return Err(ValidationError::InvalidDisplayName(
            "Name must not be empty".to_string(),
        ));
    }

    if name.len() > MAX_DISPLAY_NAME_LENGTH {
        return Err(ValidationError::InvalidDisplayName(format!(
            "Name must be between 1 and {MAX_DISPLAY_NAME_LENGTH} characters"
        )));
    }

    // Screen out markup-ish characters; the name is echoed into emails
    if !DISPLAY_NAME_REGEX.is_match(name) {
        return Err(ValidationError::InvalidDisplayName(
            "Name contains invalid characters".to_string(),
        ));
    }

    Ok(name)
}
