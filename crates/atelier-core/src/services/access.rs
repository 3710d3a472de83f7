//! Access gate: bearer-token authentication and role authorization.

use uuid::Uuid;

use crate::domain::Role;
use crate::error::DomainError;
use crate::ports::{AuthError, TokenClaims, TokenService};

/// The caller behind a validated bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: Uuid,
    pub role: Role,
}

impl Identity {
    /// Fails with [`DomainError::Authorization`] unless the caller holds `role`.
    pub fn require_role(&self, role: Role) -> Result<(), DomainError> {
        if self.role == role {
            Ok(())
        } else {
            tracing::debug!(user_id = %self.user_id, role = %self.role, required = %role, "Role check failed");
            Err(DomainError::Authorization)
        }
    }
}

impl From<TokenClaims> for Identity {
    fn from(claims: TokenClaims) -> Self {
        Self {
            user_id: claims.user_id,
            role: claims.role,
        }
    }
}

/// Authenticate the raw `Authorization` header value.
///
/// A missing header, a scheme other than `Bearer`, or a token the service
/// rejects all collapse into [`DomainError::Authentication`].
pub fn authenticate_bearer(
    tokens: &dyn TokenService,
    header: Option<&str>,
) -> Result<Identity, DomainError> {
    let token = header
        .and_then(bearer_token)
        .ok_or(DomainError::Authentication)?;

    tokens.validate_token(token).map(Identity::from).map_err(|e| {
        match &e {
            AuthError::TokenExpired => tracing::debug!("Rejected expired token"),
            other => tracing::debug!(error = %other, "Rejected token"),
        }
        DomainError::Authentication
    })
}

fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
