//! SeaORM entities backing the stores.

pub mod product;
pub mod user;
