//! Error handling - `{success: false, message}` responses.

use actix_web::{HttpRequest, HttpResponse, ResponseError, error::JsonPayloadError, http::StatusCode};
use atelier_core::error::{DomainError, INVALID_CREDENTIALS};
use atelier_shared::ErrorResponse;
use std::fmt;

/// Application-level error type rendered as the shared failure body.
#[derive(Debug)]
pub enum AppError {
    /// One message per failing field; the first becomes `message`.
    Validation(Vec<String>),
    BadRequest(String),
    /// Login with unknown email or wrong password.
    InvalidCredentials,
    /// Missing or rejected bearer token.
    Unauthorized,
    Forbidden,
    NotFound(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(errors) => write!(f, "Validation errors: {:?}", errors),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::InvalidCredentials => write!(f, "Invalid credentials"),
            AppError::Unauthorized => write!(f, "Unauthorized"),
            AppError::Forbidden => write!(f, "Forbidden"),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials | AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::Validation(errors) => ErrorResponse::validation(errors.clone()),
            AppError::BadRequest(detail) => ErrorResponse::new(detail.clone()),
            AppError::InvalidCredentials => ErrorResponse::new(INVALID_CREDENTIALS),
            AppError::Unauthorized => ErrorResponse::unauthorized(),
            AppError::Forbidden => ErrorResponse::forbidden(),
            AppError::NotFound(detail) => ErrorResponse::not_found(detail.clone()),
            AppError::Internal(detail) => {
                tracing::error!(error = %detail, "Internal error");
                ErrorResponse::internal_error()
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

// Conversion from domain errors
impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(errors) => AppError::Validation(errors),
            DomainError::Conflict(msg) => AppError::BadRequest(msg),
            DomainError::Authentication => AppError::InvalidCredentials,
            DomainError::Authorization => AppError::Forbidden,
            DomainError::NotFound { entity_type, .. } => {
                AppError::NotFound(format!("{} not found", entity_type))
            }
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

/// Render body-parsing failures in the shared shape.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(error = %err, "Rejected request body");

    let message = match &err {
        JsonPayloadError::ContentType => "Content-Type must be application/json".to_string(),
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
            "Request body is too large".to_string()
        }
        _ => "Malformed JSON body".to_string(),
    };

    AppError::BadRequest(message).into()
}

/// Fallback for unknown routes.
pub async fn route_not_found() -> AppResult<HttpResponse> {
    Err(AppError::NotFound("Route not found".to_string()))
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
