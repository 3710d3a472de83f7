//! Application services - the flows the HTTP layer drives.

mod access;
mod auth;
mod catalog;

#[cfg(test)]
mod test_support;

pub use access::{Identity, authenticate_bearer};
pub use auth::{AuthService, AuthSession};
pub use catalog::CatalogService;
