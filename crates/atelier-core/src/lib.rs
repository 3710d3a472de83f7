//! # Atelier Core
//!
//! The domain layer of the Atelier catalog.
//! This crate contains the business rules (registration, login, catalog
//! management) with zero infrastructure dependencies; storage, hashing,
//! tokens and mail are reached through the traits in [`ports`].

pub mod commands;
pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::DomainError;
