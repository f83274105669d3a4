// ============================
// signup-backend-lib/src/auth/mod.rs
// ============================
//! Credential primitives: password hashing and one-time codes.

pub mod otp;
pub mod password;

pub use otp::{generate_code, CODE_LEN};
pub use password::{hash_password, hash_password_secure, meets_requirements, verify_password};
