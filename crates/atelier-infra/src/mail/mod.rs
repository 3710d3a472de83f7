//! Welcome notification delivery.
//!
//! [`LogNotifier`] is always available; [`SmtpWelcomeNotifier`] needs the
//! `mail` feature.

mod log;
#[cfg(feature = "mail")]
mod smtp;

pub use log::LogNotifier;
#[cfg(feature = "mail")]
pub use smtp::{SmtpConfig, SmtpWelcomeNotifier};

pub(crate) const WELCOME_SUBJECT: &str = "Welcome to ATELIER - Your Design Journey Begins";
