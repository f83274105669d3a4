// ============================
// signup-backend-lib/src/auth/otp.rs
// ============================
//! One-time verification code generation.
use rand::{rngs::OsRng, Rng};

/// Width of a verification code in digits.
pub const CODE_LEN: usize = 6;

/// Generate a 6-digit verification code.
///
/// Drawn uniformly from 000000..=999999 using OS entropy, so codes keep
/// their leading zeros and are not predictable from wall-clock time.
pub fn generate_code() -> String {
    let n: u32 = OsRng.gen_range(0..1_000_000);
    format!("{n:0width$}", width = CODE_LEN)
}
