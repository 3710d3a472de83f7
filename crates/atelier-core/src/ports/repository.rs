use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Product, User};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
///
/// Each call touches a single record and is atomic on its own.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Persist a new entity. Unique-key clashes yield `RepoError::Constraint`.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Overwrite an existing entity. Yields `RepoError::NotFound` if it is gone.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID. Yields `RepoError::NotFound` if absent.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their (already normalized) email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;
}

/// Product repository.
#[async_trait]
pub trait ProductRepository: BaseRepository<Product, Uuid> {
    /// All products, most recently created first.
    async fn list_newest_first(&self) -> Result<Vec<Product>, RepoError>;
}
