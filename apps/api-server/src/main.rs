//! # Atelier API Server
//!
//! The main entry point for the Actix-web HTTP server.

use actix_web::{App, HttpServer};
use anyhow::Context;
use tracing_actix_web::TracingLogger;

use api_server::config::AppConfig;
use api_server::middleware::recover::CatchPanic;
use api_server::telemetry::{TelemetryConfig, init_telemetry};
use api_server::{AppState, configure_app};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env().context("invalid configuration")?;

    tracing::info!(
        "Starting Atelier API Server on {}:{}",
        config.host,
        config.port
    );

    let state = AppState::from_config(&config).await.map_err(|e| {
        tracing::error!(error = %e, "Startup failed");
        e
    })?;

    HttpServer::new(move || {
        App::new()
            .wrap(CatchPanic)
            .wrap(TracingLogger::default())
            .configure(configure_app(state.clone()))
    })
    .bind((config.host.as_str(), config.port))
    .with_context(|| format!("failed to bind {}:{}", config.host, config.port))?
    .run()
    .await?;

    Ok(())
}
