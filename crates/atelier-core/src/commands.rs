//! Typed commands built from raw request bodies.
//!
//! Each conversion is a pure function: it either yields a command whose
//! fields are known-good, or a [`DomainError::Validation`] listing every
//! failing field. Nothing here touches a store.

use atelier_shared::dto::{
    CreateProductRequest, LoginRequest, RegisterUserRequest, UpdateProductRequest, parse_price,
};
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::domain::Role;
use crate::error::DomainError;

/// A registration that passed validation.
#[derive(Debug, Clone)]
pub struct RegisterUser {
    pub first_name: String,
    pub last_name: String,
    /// Trimmed and lower-cased.
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Login input that passed validation.
#[derive(Debug, Clone)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

/// A product creation that passed validation.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub description: Option<String>,
    pub image: Option<String>,
}

/// Fields to change on an existing product.
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub image: Option<String>,
}

/// Canonical form used for storage and lookup.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Parse a product identifier taken from the request path.
pub fn parse_product_id(raw: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(raw.trim()).map_err(|_| DomainError::validation("Invalid product id"))
}

impl TryFrom<RegisterUserRequest> for RegisterUser {
    type Error = DomainError;

    fn try_from(mut req: RegisterUserRequest) -> Result<Self, Self::Error> {
        req.first_name = trimmed(req.first_name);
        req.last_name = trimmed(req.last_name);
        req.email = req.email.as_deref().map(normalize_email);

        let mut errors = field_messages(
            req.validate(),
            &["first_name", "last_name", "email", "password"],
        );

        if req.accept_terms != Some(true) {
            errors.push("You must accept the terms and conditions".to_string());
        }

        let role = match trimmed(req.role) {
            None => Some(Role::default()),
            Some(name) => name.parse::<Role>().ok(),
        };
        if role.is_none() {
            errors.push("Role must be either 'client' or 'admin'".to_string());
        }

        if !errors.is_empty() {
            return Err(DomainError::Validation(errors));
        }

        Ok(Self {
            first_name: req.first_name.unwrap_or_default(),
            last_name: req.last_name.unwrap_or_default(),
            email: req.email.unwrap_or_default(),
            password: req.password.unwrap_or_default(),
            role: role.unwrap_or_default(),
        })
    }
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = DomainError;

    fn try_from(mut req: LoginRequest) -> Result<Self, Self::Error> {
        req.email = req.email.as_deref().map(normalize_email);

        let errors = field_messages(req.validate(), &["email", "password"]);
        if !errors.is_empty() {
            return Err(DomainError::Validation(errors));
        }

        Ok(Self {
            email: req.email.unwrap_or_default(),
            password: req.password.unwrap_or_default(),
        })
    }
}

impl TryFrom<CreateProductRequest> for NewProduct {
    type Error = DomainError;

    fn try_from(mut req: CreateProductRequest) -> Result<Self, Self::Error> {
        req.name = req.name.map(|n| n.trim().to_string());
        req.image = trimmed(req.image);

        let errors = field_messages(req.validate(), &["name", "price", "image"]);
        if !errors.is_empty() {
            return Err(DomainError::Validation(errors));
        }

        let price = req.price.as_ref().and_then(parse_price).ok_or_else(|| {
            DomainError::validation("Price must be a non-negative number")
        })?;

        Ok(Self {
            name: req.name.unwrap_or_default(),
            price,
            description: req.description.map(|d| d.trim().to_string()),
            image: req.image,
        })
    }
}

impl TryFrom<UpdateProductRequest> for ProductPatch {
    type Error = DomainError;

    fn try_from(mut req: UpdateProductRequest) -> Result<Self, Self::Error> {
        req.name = req.name.map(|n| n.trim().to_string());
        req.image = trimmed(req.image);

        let errors = field_messages(req.validate(), &["name", "price", "image"]);
        if !errors.is_empty() {
            return Err(DomainError::Validation(errors));
        }

        Ok(Self {
            name: req.name,
            price: req.price.as_ref().and_then(parse_price),
            description: req.description.map(|d| d.trim().to_string()),
            image: req.image,
        })
    }
}

/// Trim, treating a blank string as absent.
fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Flatten validator output into messages, in the given field order.
fn field_messages(result: Result<(), ValidationErrors>, order: &[&str]) -> Vec<String> {
    let Err(errors) = result else {
        return Vec::new();
    };
    let fields = errors.field_errors();

    order
        .iter()
        .filter_map(|field| fields.get(*field))
        .flat_map(|errs| errs.iter())
        .map(|e| {
            e.message
                .as_ref()
                .map_or_else(|| e.code.to_string(), ToString::to_string)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn jane() -> RegisterUserRequest {
        RegisterUserRequest {
            first_name: Some("Jane".into()),
            last_name: Some("Doe".into()),
            email: Some("jane@x.com".into()),
            password: Some("secret1".into()),
            role: None,
            accept_terms: Some(true),
        }
    }

    fn messages(err: DomainError) -> Vec<String> {
        match err {
            DomainError::Validation(messages) => messages,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_register_valid_defaults_to_client() {
        let cmd = RegisterUser::try_from(jane()).unwrap();
        assert_eq!(cmd.role, Role::Client);
        assert_eq!(cmd.email, "jane@x.com");
    }

    #[test]
    fn test_register_normalizes_email() {
        let req = RegisterUserRequest {
            email: Some("  Jane@X.COM ".into()),
            ..jane()
        };
        assert_eq!(RegisterUser::try_from(req).unwrap().email, "jane@x.com");
    }

    #[test]
    fn test_register_requires_every_field() {
        for strip in ["first_name", "last_name", "email", "password", "accept_terms"] {
            let mut req = jane();
            match strip {
                "first_name" => req.first_name = None,
                "last_name" => req.last_name = None,
                "email" => req.email = None,
                "password" => req.password = None,
                _ => req.accept_terms = None,
            }
            assert!(
                matches!(RegisterUser::try_from(req), Err(DomainError::Validation(_))),
                "missing {strip} should fail validation"
            );
        }
    }

    #[test]
    fn test_register_rejects_terms_not_accepted() {
        let req = RegisterUserRequest {
            accept_terms: Some(false),
            ..jane()
        };
        let msgs = messages(RegisterUser::try_from(req).unwrap_err());
        assert_eq!(msgs, vec!["You must accept the terms and conditions"]);
    }

    #[test]
    fn test_register_collects_all_failures_in_field_order() {
        let req = RegisterUserRequest {
            first_name: Some("A".into()),
            last_name: Some("B".into()),
            email: Some("not-an-email".into()),
            password: Some("123".into()),
            role: None,
            accept_terms: Some(false),
        };
        let msgs = messages(RegisterUser::try_from(req).unwrap_err());
        assert_eq!(
            msgs,
            vec![
                "First name must be at least 2 characters",
                "Last name must be at least 2 characters",
                "Invalid email",
                "Password must be at least 6 characters",
                "You must accept the terms and conditions",
            ]
        );
    }

    #[test]
    fn test_register_trims_names_before_length_check() {
        let req = RegisterUserRequest {
            first_name: Some("  J ".into()),
            ..jane()
        };
        assert!(RegisterUser::try_from(req).is_err());
    }

    #[test]
    fn test_register_role_is_closed() {
        let admin = RegisterUserRequest {
            role: Some("admin".into()),
            ..jane()
        };
        assert_eq!(RegisterUser::try_from(admin).unwrap().role, Role::Admin);

        let root = RegisterUserRequest {
            role: Some("root".into()),
            ..jane()
        };
        let msgs = messages(RegisterUser::try_from(root).unwrap_err());
        assert_eq!(msgs, vec!["Role must be either 'client' or 'admin'"]);
    }

    #[test]
    fn test_login_requires_email_and_password() {
        let err = LoginCredentials::try_from(LoginRequest {
            email: Some(String::new()),
            password: None,
        })
        .unwrap_err();
        assert_eq!(messages(err).len(), 2);
    }

    #[test]
    fn test_new_product_price_bounds() {
        let negative = CreateProductRequest {
            name: Some("Test".into()),
            price: Some(json!(-1)),
            ..CreateProductRequest::default()
        };
        assert!(NewProduct::try_from(negative).is_err());

        let free = CreateProductRequest {
            name: Some("Test".into()),
            price: Some(json!(0)),
            ..CreateProductRequest::default()
        };
        assert_eq!(NewProduct::try_from(free).unwrap().price, 0.0);
    }

    #[test]
    fn test_new_product_requires_name_and_price() {
        let msgs = messages(NewProduct::try_from(CreateProductRequest::default()).unwrap_err());
        assert_eq!(msgs, vec!["Name is required", "Price is required"]);

        let blank = CreateProductRequest {
            name: Some("   ".into()),
            price: Some(json!(5)),
            ..CreateProductRequest::default()
        };
        assert!(NewProduct::try_from(blank).is_err());
    }

    #[test]
    fn test_new_product_image_must_be_http_url() {
        let bad = CreateProductRequest {
            name: Some("Lamp".into()),
            price: Some(json!(10)),
            image: Some("ftp://files/lamp.png".into()),
            ..CreateProductRequest::default()
        };
        let msgs = messages(NewProduct::try_from(bad).unwrap_err());
        assert_eq!(msgs, vec!["Image must be a valid URL"]);

        let blank = CreateProductRequest {
            name: Some("Lamp".into()),
            price: Some(json!(10)),
            image: Some("  ".into()),
            ..CreateProductRequest::default()
        };
        assert_eq!(NewProduct::try_from(blank).unwrap().image, None);
    }

    #[test]
    fn test_patch_keeps_only_supplied_fields() {
        let patch = ProductPatch::try_from(UpdateProductRequest {
            price: Some(json!("15.5")),
            ..UpdateProductRequest::default()
        })
        .unwrap();

        assert_eq!(patch.price, Some(15.5));
        assert!(patch.name.is_none());
        assert!(patch.description.is_none());
        assert!(patch.image.is_none());
    }

    #[test]
    fn test_patch_rejects_empty_name() {
        let result = ProductPatch::try_from(UpdateProductRequest {
            name: Some(" ".into()),
            ..UpdateProductRequest::default()
        });
        assert_eq!(messages(result.unwrap_err()), vec!["Name cannot be empty"]);
    }

    #[test]
    fn test_parse_product_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_product_id(&id.to_string()).unwrap(), id);
        assert!(parse_product_id("notamongoid").is_err());
    }
}
