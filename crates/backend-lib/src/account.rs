// ============================
// signup-backend-lib/src/account.rs
// ============================
//! The account record and its lifecycle states.
use serde::{Deserialize, Serialize};
use signup_common::UserProfile;

/// Lifecycle state of a stored account.
///
/// There is no `Unregistered` variant: the absence of a store record for an
/// email *is* the unregistered state. `Pending -> Verified` is the only
/// legal transition and `Verified` is terminal.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountState {
    Pending,
    Verified,
}

/// A stored account, keyed by normalized email.
///
/// Invariant: `verification_code` is `Some` iff `state == Pending`.
/// `credential_hash` is an scrypt PHC string; the plaintext password is
/// discarded immediately after hashing and never persisted.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Account {
    pub email: String,
    pub display_name: String,
    pub credential_hash: String,
    pub verification_code: Option<String>,
    pub state: AccountState,
}

impl Account {
    /// Public profile view, safe to return to clients.
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            name: self.display_name.clone(),
            email: self.email.clone(),
        }
    }
}

/// Canonical form of an email identity: trimmed and lowercased.
/// All store access keys on this form.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_ascii_lowercase()
}
