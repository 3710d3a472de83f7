//! Domain-level error types.

use thiserror::Error;
use uuid::Uuid;

/// Message shared by every credential or token failure.
pub const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Malformed or missing input; one message per failing field.
    #[error("Validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// Bad credentials or a missing, invalid or expired token.
    #[error("Authentication failed")]
    Authentication,

    #[error("Insufficient permissions")]
    Authorization,

    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: Uuid },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation(vec![message.into()])
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

impl From<RepoError> for DomainError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Constraint(msg) => DomainError::Conflict(msg),
            RepoError::Connection(msg) | RepoError::Query(msg) => DomainError::Internal(msg),
            // Callers that know the id map NotFound themselves.
            RepoError::NotFound => DomainError::Internal("unexpected missing record".into()),
        }
    }
}
