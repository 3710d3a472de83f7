#![allow(dead_code, unused_macros)]

use std::sync::Arc;

use serde_json::{Value, json};

use api_server::AppState;
use atelier_infra::{
    InMemoryProductRepository, InMemoryUserRepository, JwtConfig, JwtTokenService, LogNotifier,
};

pub const TEST_SECRET: &str = "integration-test-secret";

pub fn test_state() -> AppState {
    AppState::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(InMemoryProductRepository::new()),
        Arc::new(JwtTokenService::new(JwtConfig::new(TEST_SECRET))),
        Arc::new(LogNotifier::new()),
    )
}

pub fn registration(email: &str, role: &str) -> Value {
    json!({
        "firstName": "Jane",
        "lastName": "Doe",
        "email": email,
        "password": "secret1",
        "role": role,
        "acceptTerms": true
    })
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
}

/// Build the full application over fresh in-memory stores.
macro_rules! test_app {
    () => {
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(api_server::middleware::recover::CatchPanic)
                .configure(api_server::configure_app(common::test_state())),
        )
        .await
    };
}

/// Register an account and return its token.
macro_rules! token_for {
    ($app:expr, $email:expr, $role:expr) => {{
        let req = actix_web::test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(common::registration($email, $role))
            .to_request();
        let body: serde_json::Value = actix_web::test::call_and_read_body_json($app, req).await;
        body["token"]
            .as_str()
            .expect("registration returns a token")
            .to_string()
    }};
}
