//! # Atelier API Server
//!
//! HTTP surface over the account and catalog services. The binary in
//! `main.rs` wires configuration and adapters; everything here is also
//! used by the integration tests.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod state;
pub mod telemetry;

pub use handlers::configure_app;
pub use state::AppState;
