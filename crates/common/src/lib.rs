// ================
// common/src/lib.rs
// ================
//! Common types and structures
//! used for communication between signup clients and the server.
//! This module defines the HTTP request/response bodies for the
//! signup, verify, and signin endpoints.

use serde::{Deserialize, Serialize};

/// Body of `POST /signup`
/// # Fields
/// * `email` - Address to register; also the account identity
/// * `password` - Plaintext password (hashed server-side, never stored)
/// * `name` - Display name used to personalize the verification email
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// Body of `POST /verify`
/// # Fields
/// * `email` - Address the verification code was sent to
/// * `code` - The 6-digit one-time code from the email
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct VerifyRequest {
    pub email: String,
    pub code: String,
}

/// Body of `POST /signin`
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SigninRequest {
    pub email: String,
    pub password: String,
}

/// Generic success body carrying a human-readable message
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MessageResponse {
    pub message: String,
}

/// Public account profile returned on successful signin.
/// Never carries credential material or verification codes.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
}

/// Body of a successful `POST /signin`
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SigninResponse {
    pub message: String,
    pub user: UserProfile,
}
