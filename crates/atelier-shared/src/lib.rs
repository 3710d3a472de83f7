//! # Atelier Shared
//!
//! Wire types shared by the API server and its clients: raw request bodies
//! as they arrive over HTTP and the response envelope every endpoint uses.

pub mod dto;
pub mod response;

pub use response::{ApiResponse, ErrorResponse};
