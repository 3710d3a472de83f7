//! In-memory stores, used by tests and local runs without Postgres.
//!
//! Data is lost on process restart.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use atelier_core::domain::{Product, User};
use atelier_core::error::RepoError;
use atelier_core::ports::{BaseRepository, ProductRepository, UserRepository};

/// User store keyed by id, with email uniqueness enforced on insert.
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn insert(&self, user: User) -> Result<User, RepoError> {
        // Check and insert under one write lock so concurrent registrations
        // for the same email cannot both succeed.
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email == user.email) {
            return Err(RepoError::Constraint("users_email_key".to_string()));
        }
        if users.contains_key(&user.id) {
            return Err(RepoError::Constraint("users_pkey".to_string()));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, RepoError> {
        let mut users = self.users.write().await;

        if users
            .values()
            .any(|u| u.id != user.id && u.email == user.email)
        {
            return Err(RepoError::Constraint("users_email_key".to_string()));
        }

        match users.get_mut(&user.id) {
            Some(slot) => {
                *slot = user.clone();
                Ok(user)
            }
            None => Err(RepoError::NotFound),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.users
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }
}

/// Product store that remembers insertion order.
pub struct InMemoryProductRepository {
    products: RwLock<Vec<Product>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self {
            products: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryProductRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Product, Uuid> for InMemoryProductRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, RepoError> {
        let products = self.products.read().await;
        Ok(products.iter().find(|p| p.id == id).cloned())
    }

    async fn insert(&self, product: Product) -> Result<Product, RepoError> {
        let mut products = self.products.write().await;

        if products.iter().any(|p| p.id == product.id) {
            return Err(RepoError::Constraint("products_pkey".to_string()));
        }

        products.push(product.clone());
        Ok(product)
    }

    async fn update(&self, product: Product) -> Result<Product, RepoError> {
        let mut products = self.products.write().await;

        match products.iter_mut().find(|p| p.id == product.id) {
            Some(slot) => {
                *slot = product.clone();
                Ok(product)
            }
            None => Err(RepoError::NotFound),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut products = self.products.write().await;

        let before = products.len();
        products.retain(|p| p.id != id);

        if products.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn list_newest_first(&self) -> Result<Vec<Product>, RepoError> {
        let mut listed: Vec<Product> = self.products.read().await.iter().rev().cloned().collect();
        // Stable sort: equal timestamps keep latest-inserted first.
        listed.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(listed)
    }
}
