//! Application state - shared across all handlers.

use std::sync::Arc;

use atelier_core::ports::{ProductRepository, TokenService, UserRepository, WelcomeNotifier};
use atelier_core::services::{AuthService, CatalogService};
use atelier_infra::{Argon2PasswordService, JwtTokenService, LogNotifier};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub catalog: Arc<CatalogService>,
    pub tokens: Arc<dyn TokenService>,
}

impl AppState {
    /// Assemble the services from already-built adapters.
    pub fn new(
        users: Arc<dyn UserRepository>,
        products: Arc<dyn ProductRepository>,
        tokens: Arc<dyn TokenService>,
        notifier: Arc<dyn WelcomeNotifier>,
    ) -> Self {
        let passwords = Arc::new(Argon2PasswordService::new());

        Self {
            auth: Arc::new(AuthService::new(
                users,
                passwords,
                Arc::clone(&tokens),
                notifier,
            )),
            catalog: Arc::new(CatalogService::new(products)),
            tokens,
        }
    }

    /// Build the production state. Fails if the store is unreachable.
    pub async fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(config.jwt.clone()));
        let notifier = build_notifier(config)?;

        #[cfg(feature = "postgres")]
        let (users, products): (Arc<dyn UserRepository>, Arc<dyn ProductRepository>) = {
            use anyhow::Context;
            use atelier_infra::{PostgresProductRepository, PostgresUserRepository};

            let db = atelier_infra::connect(&config.database)
                .await
                .context("failed to connect to database")?;

            (
                Arc::new(PostgresUserRepository::new(db.clone())),
                Arc::new(PostgresProductRepository::new(db)),
            )
        };

        #[cfg(not(feature = "postgres"))]
        let (users, products): (Arc<dyn UserRepository>, Arc<dyn ProductRepository>) = {
            use atelier_infra::{InMemoryProductRepository, InMemoryUserRepository};

            tracing::warn!("Running without postgres feature - data is kept in memory");
            (
                Arc::new(InMemoryUserRepository::new()),
                Arc::new(InMemoryProductRepository::new()),
            )
        };

        tracing::info!("Application state initialized");

        Ok(Self::new(users, products, tokens, notifier))
    }
}

#[cfg(feature = "mail")]
fn build_notifier(config: &AppConfig) -> anyhow::Result<Arc<dyn WelcomeNotifier>> {
    use atelier_infra::{SmtpConfig, SmtpWelcomeNotifier};

    let Some(mail) = &config.mail else {
        tracing::warn!("EMAIL_USER/EMAIL_PASS not set; welcome emails will only be logged");
        return Ok(Arc::new(LogNotifier::new()));
    };

    let notifier = SmtpWelcomeNotifier::new(&SmtpConfig {
        host: mail.host.clone(),
        port: mail.port,
        username: mail.username.clone(),
        password: mail.password.clone(),
        from_address: mail.from_address.clone(),
        storefront_url: mail.storefront_url.clone(),
    })?;

    tracing::info!(relay = %mail.host, port = mail.port, "SMTP notifier configured");
    Ok(Arc::new(notifier))
}

#[cfg(not(feature = "mail"))]
fn build_notifier(_config: &AppConfig) -> anyhow::Result<Arc<dyn WelcomeNotifier>> {
    Ok(Arc::new(LogNotifier::new()))
}
