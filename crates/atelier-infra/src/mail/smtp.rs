//! SMTP delivery via lettre, with askama-rendered bodies.

use askama::Template;
use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, MultiPart, SinglePart, header::ContentType},
    transport::smtp::authentication::Credentials,
};

use atelier_core::domain::{PublicUser, Role};
use atelier_core::ports::{NotifyError, WelcomeNotifier};

use super::WELCOME_SUBJECT;

/// HTML body of the welcome email.
#[derive(Template)]
#[template(path = "email/welcome.html")]
struct WelcomeEmailHtml<'a> {
    first_name: &'a str,
    last_name: &'a str,
    email: &'a str,
    role: &'a str,
    storefront_url: &'a str,
}

/// Plain text body of the welcome email.
#[derive(Template)]
#[template(path = "email/welcome.txt")]
struct WelcomeEmailText<'a> {
    first_name: &'a str,
    last_name: &'a str,
    email: &'a str,
    role: &'a str,
    storefront_url: &'a str,
}

fn role_label(role: Role) -> &'static str {
    match role {
        Role::Admin => "Administrator",
        Role::Client => "Client",
    }
}

/// Render the (text, html) bodies for `user`.
fn render_bodies(user: &PublicUser, storefront_url: &str) -> Result<(String, String), NotifyError> {
    let role = role_label(user.role);

    let text = WelcomeEmailText {
        first_name: &user.first_name,
        last_name: &user.last_name,
        email: &user.email,
        role,
        storefront_url,
    }
    .render()
    .map_err(|e| NotifyError::Message(e.to_string()))?;

    let html = WelcomeEmailHtml {
        first_name: &user.first_name,
        last_name: &user.last_name,
        email: &user.email,
        role,
        storefront_url,
    }
    .render()
    .map_err(|e| NotifyError::Message(e.to_string()))?;

    Ok((text, html))
}

/// Relay settings for the welcome mail.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from_address: String,
    /// Link target for the call to action.
    pub storefront_url: String,
}

/// Sends the welcome message as a text + HTML multipart email.
#[derive(Clone)]
pub struct SmtpWelcomeNotifier {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    storefront_url: String,
}

impl SmtpWelcomeNotifier {
    /// Build the transport. No connection is opened until the first send.
    pub fn new(config: &SmtpConfig) -> Result<Self, NotifyError> {
        let from: Mailbox = config
            .from_address
            .parse()
            .map_err(|_| NotifyError::InvalidAddress(config.from_address.clone()))?;

        let credentials = Credentials::new(config.username.clone(), config.password.clone());

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| NotifyError::Delivery(e.to_string()))?
            .port(config.port)
            .credentials(credentials)
            .build();

        Ok(Self {
            mailer,
            from,
            storefront_url: config.storefront_url.clone(),
        })
    }

    fn build_message(&self, user: &PublicUser) -> Result<Message, NotifyError> {
        let to: Mailbox = user
            .email
            .parse()
            .map_err(|_| NotifyError::InvalidAddress(user.email.clone()))?;

        let (text, html) = render_bodies(user, &self.storefront_url)?;

        Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(WELCOME_SUBJECT)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(text),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(html),
                    ),
            )
            .map_err(|e| NotifyError::Message(e.to_string()))
    }
}

#[async_trait]
impl WelcomeNotifier for SmtpWelcomeNotifier {
    async fn send_welcome(&self, user: &PublicUser) -> Result<(), NotifyError> {
        let message = self.build_message(user)?;

        self.mailer
            .send(message)
            .await
            .map_err(|e| NotifyError::Delivery(e.to_string()))?;

        tracing::info!(user_id = %user.id, "Welcome email sent");
        Ok(())
    }
}
