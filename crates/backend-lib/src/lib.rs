// ============================
// signup-backend-lib/src/lib.rs
// ============================
//! Core backend-lib functionality for the signup server: account lifecycle,
//! credential handling, storage and notification seams, and the HTTP surface.

pub mod account;
pub mod accounts;
pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod notifier;
pub mod router;
pub mod store;
pub mod validation;

use std::sync::Arc;

use crate::accounts::AccountService;
use crate::config::Settings;
use crate::notifier::Notifier;
use crate::store::AccountStore;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Account lifecycle service
    pub accounts: Arc<AccountService>,
    /// Settings the state was built from
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Create a new application state from explicitly constructed services.
    /// The store and notifier are injected here at startup; there are no
    /// ambient transport globals anywhere in the crate.
    pub fn new(
        store: Arc<dyn AccountStore>,
        notifier: Arc<dyn Notifier>,
        settings: Settings,
    ) -> Self {
        let accounts = Arc::new(AccountService::new(
            store,
            notifier,
            settings.password_requirements.clone(),
        ));

        Self {
            accounts,
            settings: Arc::new(settings),
        }
    }
}
