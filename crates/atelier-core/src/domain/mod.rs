//! Domain entities - the core business objects.

mod product;
mod role;
mod user;

pub use product::{DEFAULT_PRODUCT_IMAGE, Product};
pub use role::{Role, UnknownRole};
pub use user::{PublicUser, User};
