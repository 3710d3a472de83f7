//! Registration and login.

use std::sync::Arc;

use crate::commands::{LoginCredentials, RegisterUser};
use crate::domain::{PublicUser, User};
use crate::error::{DomainError, RepoError};
use crate::ports::{PasswordService, TokenService, UserRepository, WelcomeNotifier};

const DUPLICATE_EMAIL: &str = "User already exists with this email";

/// Result of a successful registration or login.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: PublicUser,
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
}

/// Orchestrates the credential store, password hasher and token service.
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordService>,
    tokens: Arc<dyn TokenService>,
    notifier: Arc<dyn WelcomeNotifier>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        passwords: Arc<dyn PasswordService>,
        tokens: Arc<dyn TokenService>,
        notifier: Arc<dyn WelcomeNotifier>,
    ) -> Self {
        Self {
            users,
            passwords,
            tokens,
            notifier,
        }
    }

    /// Create an account and sign it in.
    ///
    /// The welcome notification is dispatched on its own task once the user
    /// row exists; its outcome only ever reaches the logs.
    pub async fn register(&self, cmd: RegisterUser) -> Result<AuthSession, DomainError> {
        if self.users.find_by_email(&cmd.email).await?.is_some() {
            return Err(DomainError::Conflict(DUPLICATE_EMAIL.to_string()));
        }

        let password_hash = self.hash_password(cmd.password).await?;

        let user = User::new(
            cmd.first_name,
            cmd.last_name,
            cmd.email,
            password_hash,
            cmd.role,
        );

        // A concurrent registration can still win the race; the store's
        // unique index decides.
        let saved = self.users.insert(user).await.map_err(|e| match e {
            RepoError::Constraint(_) => DomainError::Conflict(DUPLICATE_EMAIL.to_string()),
            other => other.into(),
        })?;

        let token = self
            .tokens
            .generate_token(saved.id, saved.role)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let user = saved.public();
        tracing::info!(user_id = %user.id, role = %user.role, "User registered");

        self.spawn_welcome(user.clone());

        Ok(AuthSession {
            user,
            token,
            expires_in: self.tokens.expiration_seconds(),
        })
    }

    /// Check credentials and issue a fresh token.
    ///
    /// Unknown email and wrong password are indistinguishable to the caller.
    pub async fn login(&self, creds: LoginCredentials) -> Result<AuthSession, DomainError> {
        let Some(user) = self.users.find_by_email(&creds.email).await? else {
            tracing::debug!("Login for unknown email");
            return Err(DomainError::Authentication);
        };

        let valid = self
            .verify_password(creds.password, user.password_hash.clone())
            .await?;

        if !valid {
            tracing::debug!(user_id = %user.id, "Login with wrong password");
            return Err(DomainError::Authentication);
        }

        let token = self
            .tokens
            .generate_token(user.id, user.role)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        tracing::info!(user_id = %user.id, "Login successful");

        Ok(AuthSession {
            user: user.public(),
            token,
            expires_in: self.tokens.expiration_seconds(),
        })
    }

    // Hashing is CPU-bound; keep it off the async workers.
    async fn hash_password(&self, password: String) -> Result<String, DomainError> {
        let passwords = Arc::clone(&self.passwords);

        tokio::task::spawn_blocking(move || passwords.hash(&password))
            .await
            .map_err(|e| DomainError::Internal(e.to_string()))?
            .map_err(|e| DomainError::Internal(e.to_string()))
    }

    async fn verify_password(&self, password: String, digest: String) -> Result<bool, DomainError> {
        let passwords = Arc::clone(&self.passwords);

        tokio::task::spawn_blocking(move || passwords.verify(&password, &digest))
            .await
            .map_err(|e| DomainError::Internal(e.to_string()))?
            .map_err(|e| DomainError::Internal(e.to_string()))
    }

    fn spawn_welcome(&self, user: PublicUser) {
        let notifier = Arc::clone(&self.notifier);

        tokio::spawn(async move {
            match notifier.send_welcome(&user).await {
                Ok(()) => tracing::info!(user_id = %user.id, "Welcome notification sent"),
                Err(e) => tracing::warn!(
                    user_id = %user.id,
                    error = %e,
                    "Welcome notification failed"
                ),
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::thread::{self, ThreadId};
    use std::time::Duration;

    use super::*;
    use crate::domain::Role;
    use crate::ports::{AuthError, BaseRepository};
    use crate::services::test_support::{
        FailingNotifier, FakePasswords, FakeTokens, MemUsers, RecordingNotifier,
    };

    fn jane() -> RegisterUser {
        RegisterUser {
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            email: "jane@x.com".into(),
            password: "secret1".into(),
            role: Role::Client,
        }
    }

    /// Remembers which threads did the hashing work.
    #[derive(Default)]
    struct ThreadRecordingPasswords(Mutex<Vec<ThreadId>>);

    impl PasswordService for ThreadRecordingPasswords {
        fn hash(&self, password: &str) -> Result<String, AuthError> {
            self.0.lock().unwrap().push(thread::current().id());
            FakePasswords.hash(password)
        }

        fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
            self.0.lock().unwrap().push(thread::current().id());
            FakePasswords.verify(password, hash)
        }
    }

    fn service(users: Arc<MemUsers>, notifier: Arc<dyn WelcomeNotifier>) -> AuthService {
        AuthService::new(
            users,
            Arc::new(FakePasswords),
            Arc::new(FakeTokens),
            notifier,
        )
    }

    #[tokio::test]
    async fn test_register_stores_digest_and_returns_token() {
        let users = Arc::new(MemUsers::default());
        let (notifier, _rx) = RecordingNotifier::new();
        let auth = service(users.clone(), Arc::new(notifier));

        let session = auth.register(jane()).await.unwrap();

        assert_eq!(session.user.email, "jane@x.com");
        assert_eq!(session.user.role, Role::Client);
        assert!(!session.token.is_empty());

        let stored = users.find_by_id(session.user.id).await.unwrap().unwrap();
        assert_ne!(stored.password_hash, "secret1");
        assert!(stored.accept_terms);
    }

    #[tokio::test]
    async fn test_register_twice_is_conflict_and_keeps_one_record() {
        let users = Arc::new(MemUsers::default());
        let auth = service(users.clone(), Arc::new(FailingNotifier));

        auth.register(jane()).await.unwrap();
        let second = auth.register(jane()).await;

        assert!(matches!(second, Err(DomainError::Conflict(_))));
        assert_eq!(users.len(), 1);
    }

    #[tokio::test]
    async fn test_register_sends_welcome_notification() {
        let users = Arc::new(MemUsers::default());
        let (notifier, mut rx) = RecordingNotifier::new();
        let auth = service(users, Arc::new(notifier));

        let session = auth.register(jane()).await.unwrap();

        let delivered = tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(delivered, session.user);
    }

    #[tokio::test]
    async fn test_register_survives_notification_failure() {
        let users = Arc::new(MemUsers::default());
        let auth = service(users.clone(), Arc::new(FailingNotifier));

        let session = auth.register(jane()).await;

        assert!(session.is_ok());
        assert_eq!(users.len(), 1);
    }

    #[tokio::test]
    async fn test_login_success_issues_token() {
        let users = Arc::new(MemUsers::default());
        let auth = service(users, Arc::new(FailingNotifier));
        let registered = auth.register(jane()).await.unwrap();

        let session = auth
            .login(LoginCredentials {
                email: "jane@x.com".into(),
                password: "secret1".into(),
            })
            .await
            .unwrap();

        assert_eq!(session.user, registered.user);
        assert!(!session.token.is_empty());
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let users = Arc::new(MemUsers::default());
        let auth = service(users, Arc::new(FailingNotifier));
        auth.register(jane()).await.unwrap();

        let wrong_password = auth
            .login(LoginCredentials {
                email: "jane@x.com".into(),
                password: "wrong".into(),
            })
            .await
            .unwrap_err();
        let unknown_email = auth
            .login(LoginCredentials {
                email: "nobody@x.com".into(),
                password: "secret1".into(),
            })
            .await
            .unwrap_err();

        assert!(matches!(wrong_password, DomainError::Authentication));
        assert!(matches!(unknown_email, DomainError::Authentication));
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }

    #[tokio::test]
    async fn test_password_work_runs_off_the_runtime_thread() {
        let passwords = Arc::new(ThreadRecordingPasswords::default());
        let auth = AuthService::new(
            Arc::new(MemUsers::default()),
            passwords.clone(),
            Arc::new(FakeTokens),
            Arc::new(FailingNotifier),
        );

        auth.register(jane()).await.unwrap();
        auth.login(LoginCredentials {
            email: "jane@x.com".into(),
            password: "secret1".into(),
        })
        .await
        .unwrap();

        let runtime_thread = thread::current().id();
        let seen = passwords.0.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert!(seen.iter().all(|id| *id != runtime_thread));
    }

    #[tokio::test]
    async fn test_session_reports_token_lifetime() {
        let auth = service(Arc::new(MemUsers::default()), Arc::new(FailingNotifier));

        let session = auth.register(jane()).await.unwrap();

        assert_eq!(session.expires_in, FakeTokens.expiration_seconds());
    }
}
