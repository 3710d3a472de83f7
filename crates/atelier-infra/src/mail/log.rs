use async_trait::async_trait;

use atelier_core::domain::PublicUser;
use atelier_core::ports::{NotifyError, WelcomeNotifier};

use super::WELCOME_SUBJECT;

/// Notifier used when no relay credentials are configured.
///
/// Records the would-be delivery in the log and always succeeds.
#[derive(Debug, Default, Clone)]
pub struct LogNotifier;

impl LogNotifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl WelcomeNotifier for LogNotifier {
    async fn send_welcome(&self, user: &PublicUser) -> Result<(), NotifyError> {
        tracing::info!(
            user_id = %user.id,
            subject = WELCOME_SUBJECT,
            "Mail relay not configured; skipping welcome email"
        );
        Ok(())
    }
}
