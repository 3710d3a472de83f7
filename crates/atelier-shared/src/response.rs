//! Standardized API response envelope.
//!
//! Every body carries a `success` flag. Successful payloads are flattened
//! next to it, failures carry a human-readable `message`.

use serde::{Deserialize, Serialize};

/// Standard successful API response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data,
        }
    }

    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data,
        }
    }
}

/// Failure body shared by every endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,

    /// A human-readable explanation of the failure.
    pub message: String,

    /// Individual validation messages, when there are several.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            errors: Vec::new(),
        }
    }

    pub fn with_errors(mut self, errors: Vec<String>) -> Self {
        self.errors = errors;
        self
    }

    pub fn validation(errors: Vec<String>) -> Self {
        let message = errors
            .first()
            .cloned()
            .unwrap_or_else(|| "Validation failed".to_string());
        Self::new(message).with_errors(errors)
    }

    pub fn unauthorized() -> Self {
        Self::new("Authentication required")
    }

    pub fn forbidden() -> Self {
        Self::new("Admin access required")
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(detail)
    }

    pub fn internal_error() -> Self {
        Self::new("Internal server error")
    }
}
