// ============================
// signup-backend-lib/src/accounts.rs
// ============================
//! The account lifecycle service: signup, verify, signin.
//!
//! This is the sole writer of account state. Operations on the same email
//! are serialized through a per-email lock, so the store's check-then-act
//! sequences (existence check before create, read before conditional write)
//! cannot interleave for one identity. Different emails never contend, and
//! a lock entry lives only while requests for its email are in flight, so
//! the lock map is bounded by concurrency, not by the emails ever submitted.
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::account::{normalize_email, Account, AccountState};
use crate::auth;
use crate::config::PasswordRequirements;
use crate::error::AppError;
use crate::notifier::Notifier;
use crate::store::AccountStore;
use crate::validation;
use signup_common::UserProfile;

/// Orchestrates the account state machine against the store and notifier.
pub struct AccountService {
    store: Arc<dyn AccountStore>,
    notifier: Arc<dyn Notifier>,
    password_requirements: PasswordRequirements,
    email_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl AccountService {
    pub fn new(
        store: Arc<dyn AccountStore>,
        notifier: Arc<dyn Notifier>,
        password_requirements: PasswordRequirements,
    ) -> Self {
        Self {
            store,
            notifier,
            password_requirements,
            email_locks: DashMap::new(),
        }
    }

    fn lock_for(&self, email: &str) -> Arc<Mutex<()>> {
        self.email_locks
            .entry(email.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Drop the lock entry once no in-flight request holds it. `remove_if`
    /// runs under the shard lock, so the count check cannot race `lock_for`.
    fn release_lock(&self, email: &str) {
        self.email_locks
            .remove_if(email, |_, lock| Arc::strong_count(lock) == 1);
    }

    /// Signup: `NonExistent -> Pending`.
    ///
    /// A record in any state rejects with `AlreadyExists`; a still-pending
    /// signup is not refreshed with a fresh code. If the notifier fails
    /// after the account was persisted, the account stays `Pending` and the
    /// failure is surfaced (no rollback).
    pub async fn signup(
        &self,
        email: &str,
        password: String,
        display_name: &str,
    ) -> Result<(), AppError> {
        let email = normalize_email(email);
        validation::validate_email(&email)?;
        validation::validate_display_name(display_name)?;
        validation::validate_password(&password, &self.password_requirements)?;

        let lock = self.lock_for(&email);
        let result = {
            let _guard = lock.lock().await;
            self.signup_locked(&email, password, display_name).await
        };
        drop(lock);
        self.release_lock(&email);
        result
    }

    async fn signup_locked(
        &self,
        email: &str,
        mut password: String,
        display_name: &str,
    ) -> Result<(), AppError> {
        if self.store.find_by_email(email).await?.is_some() {
            return Err(AppError::AlreadyExists);
        }

        // scrypt is CPU-bound; keep it off the async workers
        let credential_hash =
            tokio::task::spawn_blocking(move || auth::password::hash_password_secure(&mut password))
                .await
                .map_err(|e| AppError::Internal(e.to_string()))?
                .map_err(|e| AppError::Internal(e.to_string()))?;

        let code = auth::otp::generate_code();
        let account = Account {
            email: email.to_string(),
            display_name: display_name.to_string(),
            credential_hash,
            verification_code: Some(code.clone()),
            state: AccountState::Pending,
        };
        self.store.create(account).await?;
        info!(email = %email, "account created, pending verification");

        if let Err(err) = self.notifier.send(email, display_name, &code).await {
            warn!(email = %email, error = %err, "verification email delivery failed");
            return Err(err);
        }

        Ok(())
    }

    /// Verify: `Pending -> Verified`.
    ///
    /// Exact equality against the stored code; a mismatch leaves the record
    /// untouched. Once verified the stored code is cleared, so any further
    /// submission naturally fails with `InvalidCode`.
    pub async fn verify(&self, email: &str, code: &str) -> Result<(), AppError> {
        let email = normalize_email(email);

        let lock = self.lock_for(&email);
        let result = {
            let _guard = lock.lock().await;
            self.verify_locked(&email, code).await
        };
        drop(lock);
        self.release_lock(&email);
        result
    }

    async fn verify_locked(&self, email: &str, code: &str) -> Result<(), AppError> {
        let mut account = self
            .store
            .find_by_email(email)
            .await?
            .ok_or(AppError::NotFound)?;

        match account.verification_code.as_deref() {
            Some(stored) if stored == code => {
                account.state = AccountState::Verified;
                account.verification_code = None;
                self.store.update(account).await?;
                info!(email = %email, "account verified");
                Ok(())
            },
            _ => Err(AppError::InvalidCode),
        }
    }

    /// Signin: read-only credential proof.
    ///
    /// Unknown email and wrong password produce the identical
    /// `InvalidCredentials` outcome so responses never reveal whether an
    /// email is registered. A correct password on a `Pending` account is the
    /// distinct `NotVerified` signal.
    pub async fn signin(&self, email: &str, password: String) -> Result<UserProfile, AppError> {
        let email = normalize_email(email);

        let lock = self.lock_for(&email);
        let result = {
            let _guard = lock.lock().await;
            self.signin_locked(&email, password).await
        };
        drop(lock);
        self.release_lock(&email);
        result
    }

    async fn signin_locked(&self, email: &str, password: String) -> Result<UserProfile, AppError> {
        let Some(account) = self.store.find_by_email(email).await? else {
            return Err(AppError::InvalidCredentials);
        };

        let hash = account.credential_hash.clone();
        let password_ok =
            tokio::task::spawn_blocking(move || auth::password::verify_password(&hash, &password))
                .await
                .map_err(|e| AppError::Internal(e.to_string()))?;

        if !password_ok {
            return Err(AppError::InvalidCredentials);
        }

        match account.state {
            AccountState::Pending => Err(AppError::NotVerified),
            AccountState::Verified => Ok(account.profile()),
        }
    }
}
