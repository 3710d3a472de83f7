use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::commands::{NewProduct, ProductPatch};

/// Image used when a product is created without one.
pub const DEFAULT_PRODUCT_IMAGE: &str =
    "https://images.pexels.com/photos/1029604/pexels-photo-1029604.jpeg";

/// Product entity - a catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Create a product from a validated command, applying defaults.
    pub fn new(cmd: NewProduct) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: cmd.name,
            description: cmd.description.unwrap_or_default(),
            price: cmd.price,
            image: cmd
                .image
                .unwrap_or_else(|| DEFAULT_PRODUCT_IMAGE.to_string()),
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge the supplied fields; everything else is kept.
    pub fn apply(&mut self, patch: ProductPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(image) = patch.image {
            self.image = image;
        }
        self.updated_at = Utc::now();
    }
}

impl From<Product> for atelier_shared::dto::ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name,
            description: product.description,
            price: product.price,
            image: product.image,
            created_at: product.created_at.to_rfc3339(),
            updated_at: product.updated_at.to_rfc3339(),
        }
    }
}
