//! # Atelier Infrastructure
//!
//! Concrete implementations of the ports defined in `atelier-core`.
//! This crate contains the database, hashing, token and mail integrations.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external services: in-memory stores, log-only mail
//! - `postgres` - PostgreSQL database support via SeaORM
//! - `auth` - JWT + Argon2 authentication
//! - `mail` - SMTP delivery via lettre

pub mod database;
pub mod mail;

#[cfg(feature = "auth")]
pub mod auth;

// Re-exports - In-Memory
pub use database::{DatabaseConfig, InMemoryProductRepository, InMemoryUserRepository};
pub use mail::LogNotifier;

#[cfg(feature = "postgres")]
pub use database::{
    DatabaseConnection, PostgresProductRepository, PostgresUserRepository, connect,
};

#[cfg(feature = "auth")]
pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};

#[cfg(feature = "mail")]
pub use mail::{SmtpConfig, SmtpWelcomeNotifier};
