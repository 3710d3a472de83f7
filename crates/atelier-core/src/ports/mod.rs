//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod clock;
mod notify;
mod repository;

pub use auth::{AuthError, PasswordService, TokenClaims, TokenService};
pub use clock::{Clock, SystemClock};
pub use notify::{NotifyError, WelcomeNotifier};
pub use repository::{BaseRepository, ProductRepository, UserRepository};
