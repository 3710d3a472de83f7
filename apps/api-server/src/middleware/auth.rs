//! Authentication extractors.
//!
//! Put these before `Path`/`Json` in a handler's arguments: actix runs
//! extractors in order, so the access check happens before the id or the
//! body is looked at.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use std::future::{Ready, ready};

use atelier_core::domain::Role;
use atelier_core::services::{self, authenticate_bearer};

use super::error::AppError;
use crate::state::AppState;

/// Authenticated caller.
///
/// ```ignore
/// async fn protected_route(identity: Identity) -> impl Responder {
///     format!("Hello, user {}!", identity.user_id)
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Identity(pub services::Identity);

impl std::ops::Deref for Identity {
    type Target = services::Identity;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for Identity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(identify(req).map(Identity))
    }
}

/// Authenticated caller holding the admin role.
#[derive(Debug, Clone, Copy)]
pub struct AdminIdentity(pub services::Identity);

impl FromRequest for AdminIdentity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let result = Identity::from_request(req, payload)
            .into_inner()
            .and_then(|Identity(identity)| {
                identity.require_role(Role::Admin)?;
                Ok(AdminIdentity(identity))
            });
        ready(result)
    }
}

fn identify(req: &HttpRequest) -> Result<services::Identity, AppError> {
    let Some(state) = req.app_data::<web::Data<AppState>>() else {
        return Err(AppError::Internal("AppState not found in app data".into()));
    };

    let header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    authenticate_bearer(state.tokens.as_ref(), header).map_err(|_| AppError::Unauthorized)
}
