// ============================
// signup-backend-lib/src/notifier.rs
// ============================
//! Out-of-band delivery of verification codes.
use async_trait::async_trait;
use tracing::info;

use crate::error::AppError;

/// Delivery abstraction for verification codes.
///
/// The lifecycle service calls this synchronously during signup and reports
/// failure to the caller; it never retries. Real deployments implement this
/// over SMTP or a mail API.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver `code` to `to_email`, or return `NotificationFailed`.
    async fn send(&self, to_email: &str, display_name: &str, code: &str) -> Result<(), AppError>;
}

/// Local dev notifier that logs the delivery instead of sending real email.
#[derive(Clone, Debug, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, to_email: &str, display_name: &str, code: &str) -> Result<(), AppError> {
        info!(
            to_email = %to_email,
            display_name = %display_name,
            code = %code,
            "verification email send stub"
        );
        Ok(())
    }
}
