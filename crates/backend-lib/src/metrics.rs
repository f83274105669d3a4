// ==============
// crates/backend-lib/src/metrics.rs

//! Central place for Prometheus metric keys
pub const SIGNUP_CREATED: &str = "signup.created";
pub const SIGNUP_REJECTED: &str = "signup.rejected";
pub const VERIFY_COMPLETED: &str = "verify.completed";
pub const VERIFY_REJECTED: &str = "verify.rejected";
pub const SIGNIN_ACCEPTED: &str = "signin.accepted";
pub const SIGNIN_REJECTED: &str = "signin.rejected";
