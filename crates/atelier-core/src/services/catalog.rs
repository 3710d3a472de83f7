//! Product catalog management.

use std::sync::Arc;

use uuid::Uuid;

use crate::commands::{NewProduct, ProductPatch};
use crate::domain::Product;
use crate::error::{DomainError, RepoError};
use crate::ports::ProductRepository;

pub struct CatalogService {
    products: Arc<dyn ProductRepository>,
}

impl CatalogService {
    pub fn new(products: Arc<dyn ProductRepository>) -> Self {
        Self { products }
    }

    /// The whole catalog, newest first.
    pub async fn list(&self) -> Result<Vec<Product>, DomainError> {
        Ok(self.products.list_newest_first().await?)
    }

    pub async fn create(&self, cmd: NewProduct) -> Result<Product, DomainError> {
        let product = self.products.insert(Product::new(cmd)).await?;
        tracing::info!(product_id = %product.id, name = %product.name, "Product created");
        Ok(product)
    }

    /// Merge `patch` into the product and return the stored result.
    pub async fn update(&self, id: Uuid, patch: ProductPatch) -> Result<Product, DomainError> {
        let mut product = self
            .products
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))?;

        product.apply(patch);

        let product = self.products.update(product).await.map_err(|e| match e {
            RepoError::NotFound => not_found(id),
            other => other.into(),
        })?;

        tracing::info!(product_id = %id, "Product updated");
        Ok(product)
    }

    /// Remove a product. Deleting an absent id is `NotFound`, every time.
    pub async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        self.products.delete(id).await.map_err(|e| match e {
            RepoError::NotFound => not_found(id),
            other => other.into(),
        })?;

        tracing::info!(product_id = %id, "Product deleted");
        Ok(())
    }
}

fn not_found(id: Uuid) -> DomainError {
    DomainError::NotFound {
        entity_type: "Product",
        id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::MemProducts;

    fn catalog() -> CatalogService {
        CatalogService::new(Arc::new(MemProducts::default()))
    }

    fn new_product(name: &str, price: f64) -> NewProduct {
        NewProduct {
            name: name.into(),
            price,
            description: None,
            image: None,
        }
    }

    #[tokio::test]
    async fn test_empty_catalog_lists_nothing() {
        assert!(catalog().list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let catalog = catalog();
        catalog.create(new_product("Chair", 80.0)).await.unwrap();
        catalog.create(new_product("Lamp", 29.99)).await.unwrap();

        let names: Vec<_> = catalog
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Lamp", "Chair"]);
    }

    #[tokio::test]
    async fn test_update_merges_fields() {
        let catalog = catalog();
        let created = catalog.create(new_product("Lamp", 29.99)).await.unwrap();

        let updated = catalog
            .update(
                created.id,
                ProductPatch {
                    description: Some("Brass desk lamp".into()),
                    ..ProductPatch::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.description, "Brass desk lamp");
        assert_eq!(updated.name, "Lamp");
        assert_eq!(updated.price, 29.99);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let result = catalog()
            .update(Uuid::new_v4(), ProductPatch::default())
            .await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_repeated_delete_is_not_found() {
        let catalog = catalog();
        let created = catalog.create(new_product("Lamp", 29.99)).await.unwrap();

        catalog.delete(created.id).await.unwrap();
        let again = catalog.delete(created.id).await;

        assert!(matches!(again, Err(DomainError::NotFound { .. })));
        assert!(catalog.list().await.unwrap().is_empty());
    }
}
