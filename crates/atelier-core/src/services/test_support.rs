//! Hand-rolled fakes for service tests.

use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::domain::{Product, PublicUser, Role, User};
use crate::error::RepoError;
use crate::ports::{
    AuthError, BaseRepository, NotifyError, PasswordService, ProductRepository, TokenClaims,
    TokenService, UserRepository, WelcomeNotifier,
};

#[derive(Default)]
pub struct MemUsers {
    rows: Mutex<Vec<User>>,
}

impl MemUsers {
    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for MemUsers {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.rows.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn insert(&self, user: User) -> Result<User, RepoError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|u| u.email == user.email) {
            return Err(RepoError::Constraint("email".into()));
        }
        rows.push(user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, RepoError> {
        let mut rows = self.rows.lock().unwrap();
        let slot = rows
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or(RepoError::NotFound)?;
        *slot = user.clone();
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|u| u.id != id);
        if rows.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MemUsers {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }
}

#[derive(Default)]
pub struct MemProducts {
    rows: Mutex<Vec<Product>>,
}

#[async_trait]
impl BaseRepository<Product, Uuid> for MemProducts {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, RepoError> {
        Ok(self.rows.lock().unwrap().iter().find(|p| p.id == id).cloned())
    }

    async fn insert(&self, product: Product) -> Result<Product, RepoError> {
        self.rows.lock().unwrap().push(product.clone());
        Ok(product)
    }

    async fn update(&self, product: Product) -> Result<Product, RepoError> {
        let mut rows = self.rows.lock().unwrap();
        let slot = rows
            .iter_mut()
            .find(|p| p.id == product.id)
            .ok_or(RepoError::NotFound)?;
        *slot = product.clone();
        Ok(product)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|p| p.id != id);
        if rows.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl ProductRepository for MemProducts {
    async fn list_newest_first(&self) -> Result<Vec<Product>, RepoError> {
        Ok(self.rows.lock().unwrap().iter().rev().cloned().collect())
    }
}

/// Reversible "hash" so tests can see the plaintext never gets stored as-is.
pub struct FakePasswords;

impl PasswordService for FakePasswords {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        Ok(format!("fake${}", password.chars().rev().collect::<String>()))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        Ok(self.hash(password)? == hash)
    }
}

/// Tokens of the form `<uuid>.<role>`, never expiring.
pub struct FakeTokens;

impl TokenService for FakeTokens {
    fn generate_token(&self, user_id: Uuid, role: Role) -> Result<String, AuthError> {
        Ok(format!("{user_id}.{role}"))
    }

    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let (id, role) = token
            .split_once('.')
            .ok_or_else(|| AuthError::InvalidToken("malformed".into()))?;
        Ok(TokenClaims {
            user_id: Uuid::parse_str(id).map_err(|e| AuthError::InvalidToken(e.to_string()))?,
            role: role
                .parse()
                .map_err(|_| AuthError::InvalidToken("role".into()))?,
        })
    }

    fn expiration_seconds(&self) -> i64 {
        3600
    }
}

/// Forwards every delivered notification to a channel.
pub struct RecordingNotifier {
    tx: mpsc::UnboundedSender<PublicUser>,
}

impl RecordingNotifier {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<PublicUser>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

#[async_trait]
impl WelcomeNotifier for RecordingNotifier {
    async fn send_welcome(&self, user: &PublicUser) -> Result<(), NotifyError> {
        self.tx
            .send(user.clone())
            .map_err(|e| NotifyError::Delivery(e.to_string()))
    }
}

pub struct FailingNotifier;

#[async_trait]
impl WelcomeNotifier for FailingNotifier {
    async fn send_welcome(&self, _user: &PublicUser) -> Result<(), NotifyError> {
        Err(NotifyError::Delivery("relay unreachable".into()))
    }
}
