//! HTTP handlers and route configuration.

mod auth;
mod health;
mod products;

use actix_web::web;

use crate::middleware::error::{json_error_handler, route_not_found};
use crate::state::AppState;

/// Register state, body limits and every route. Shared by `main` and the
/// integration tests.
pub fn configure_app(state: AppState) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(web::Data::new(state))
            .app_data(
                web::JsonConfig::default()
                    .limit(64 * 1024)
                    .error_handler(json_error_handler),
            )
            .configure(configure_routes)
            .default_service(web::to(route_not_found));
    }
}

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .default_service(web::to(route_not_found))
            // Public routes
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register))
                    .route("/login", web::post().to(auth::login)),
            )
            .service(
                web::scope("/products")
                    .route("", web::get().to(products::list))
                    // Admin routes
                    .route("/admin", web::post().to(products::create))
                    .service(
                        web::resource("/admin/{id}")
                            .route(web::put().to(products::update))
                            .route(web::delete().to(products::delete)),
                    ),
            ),
    );
}
