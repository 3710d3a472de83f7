//! Authentication handlers.

use actix_web::{HttpResponse, web};

use atelier_core::commands::{LoginCredentials, RegisterUser};
use atelier_core::services::AuthSession;
use atelier_shared::ApiResponse;
use atelier_shared::dto::{AuthPayload, LoginRequest, RegisterUserRequest};

use crate::middleware::error::AppResult;
use crate::state::AppState;

fn payload(session: AuthSession) -> AuthPayload {
    AuthPayload {
        user: session.user.into(),
        token: session.token,
        expires_in: session.expires_in,
    }
}

/// POST /api/auth/register
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterUserRequest>,
) -> AppResult<HttpResponse> {
    let cmd = RegisterUser::try_from(body.into_inner())?;
    let session = state.auth.register(cmd).await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(
        payload(session),
        "Registration successful",
    )))
}

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let creds = LoginCredentials::try_from(body.into_inner())?;
    let session = state.auth.login(creds).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        payload(session),
        "Login successful",
    )))
}
