//! Outbound notification port.

use async_trait::async_trait;

use crate::domain::PublicUser;

/// Sends the greeting a new account receives after registration.
///
/// Delivery is best effort; callers never let a failure reach the client.
#[async_trait]
pub trait WelcomeNotifier: Send + Sync {
    async fn send_welcome(&self, user: &PublicUser) -> Result<(), NotifyError>;
}

/// Notification delivery errors.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Failed to build message: {0}")]
    Message(String),

    #[error("Delivery failed: {0}")]
    Delivery(String),
}
