//! Data Transfer Objects - request/response types for the API.
//!
//! Request bodies keep every field optional so that a missing field is
//! reported as a validation message instead of a JSON decoding failure.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::{Validate, ValidationError};

/// Request to register a new user.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserRequest {
    #[validate(
        required(message = "First name is required"),
        length(min = 2, message = "First name must be at least 2 characters")
    )]
    pub first_name: Option<String>,

    #[validate(
        required(message = "Last name is required"),
        length(min = 2, message = "Last name must be at least 2 characters")
    )]
    pub last_name: Option<String>,

    #[validate(
        required(message = "Email is required"),
        email(message = "Invalid email")
    )]
    pub email: Option<String>,

    #[validate(
        required(message = "Password is required"),
        length(min = 6, message = "Password must be at least 6 characters")
    )]
    pub password: Option<String>,

    pub role: Option<String>,

    pub accept_terms: Option<bool>,
}

/// Request to login.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(
        required(message = "Email is required"),
        email(message = "Invalid email")
    )]
    pub email: Option<String>,

    #[validate(
        required(message = "Password is required"),
        length(min = 1, message = "Password is required")
    )]
    pub password: Option<String>,
}

/// Request to create a product.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    #[validate(
        required(message = "Name is required"),
        length(min = 1, message = "Name is required")
    )]
    pub name: Option<String>,

    pub description: Option<String>,

    #[validate(
        required(message = "Price is required"),
        custom(function = "validate_price")
    )]
    pub price: Option<Value>,

    #[validate(custom(function = "validate_image_url"))]
    pub image: Option<String>,
}

/// Request to update a product. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,

    pub description: Option<String>,

    #[validate(custom(function = "validate_price"))]
    pub price: Option<Value>,

    #[validate(custom(function = "validate_image_url"))]
    pub image: Option<String>,
}

/// Response containing a user's public information.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: String,
}

/// Payload returned by register and login.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthPayload {
    pub user: UserResponse,
    pub token: String,
    /// Seconds until `token` expires.
    pub expires_in: i64,
}

/// A catalog entry as exposed to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Payload wrapping a single product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductPayload {
    pub product: ProductResponse,
}

/// Payload for the public catalog listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductListPayload {
    pub count: usize,
    pub products: Vec<ProductResponse>,
}

/// Empty payload for endpoints that only report success.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Empty {}

/// Read a price from a JSON number or a numeric string.
///
/// Returns `None` for anything that is not a finite, non-negative number.
pub fn parse_price(value: &Value) -> Option<f64> {
    let price = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };

    (price.is_finite() && price >= 0.0).then_some(price)
}

/// Whether `value` is an absolute `http` or `https` URL with a host.
pub fn is_http_url(value: &str) -> bool {
    url::Url::parse(value)
        .map(|u| matches!(u.scheme(), "http" | "https") && u.host_str().is_some())
        .unwrap_or(false)
}

fn validate_price(value: &Value) -> Result<(), ValidationError> {
    if parse_price(value).is_some() {
        Ok(())
    } else {
        Err(ValidationError::new("price")
            .with_message("Price must be a non-negative number".into()))
    }
}

fn validate_image_url(value: &str) -> Result<(), ValidationError> {
    // Blank means "not provided"; the catalog applies its placeholder.
    if value.trim().is_empty() || is_http_url(value.trim()) {
        Ok(())
    } else {
        Err(ValidationError::new("image").with_message("Image must be a valid URL".into()))
    }
}
