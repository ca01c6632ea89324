use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, UpdateProduct};

/// Repository trait for Product persistence
///
/// This trait defines the data access interface for products.
/// Implementations can use different storage backends.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Persist a new product; the identifier is assigned here, on save
    async fn create(&self, input: CreateProduct) -> ProductResult<Product>;

    /// Get a product by ID
    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>>;

    /// List all products, in store iteration order
    async fn list(&self) -> ProductResult<Vec<Product>>;

    /// Update an existing product
    async fn update(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Product>;

    /// Delete a product by ID, returning whether it existed
    async fn delete(&self, id: Uuid) -> ProductResult<bool>;

    /// Check whether a product with this name exists, ignoring case
    async fn exists_by_name(&self, name: &str) -> ProductResult<bool>;
}

/// In-memory implementation of ProductRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<Uuid, Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self {
            products: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let mut products = self.products.write().await;

        let name_exists = products
            .values()
            .any(|p| p.name.to_lowercase() == input.name.to_lowercase());

        if name_exists {
            return Err(ProductError::DuplicateName(input.name));
        }

        let product = Product::new(input);
        products.insert(product.id, product.clone());

        tracing::info!(product_id = %product.id, "Created product");
        Ok(product)
    }

    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(&id).cloned())
    }

    async fn list(&self) -> ProductResult<Vec<Product>> {
        // Map iteration order; deliberately unspecified.
        let products = self.products.read().await;
        Ok(products.values().cloned().collect())
    }

    async fn update(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Product> {
        let mut products = self.products.write().await;

        let product = products.get_mut(&id).ok_or(ProductError::NotFound(id))?;
        product.apply_update(input);
        let updated = product.clone();

        tracing::info!(product_id = %id, "Updated product");
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> ProductResult<bool> {
        let mut products = self.products.write().await;

        if products.remove(&id).is_some() {
            tracing::info!(product_id = %id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn exists_by_name(&self, name: &str) -> ProductResult<bool> {
        let products = self.products.read().await;
        let exists = products
            .values()
            .any(|p| p.name.to_lowercase() == name.to_lowercase());
        Ok(exists)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn keyboard() -> CreateProduct {
        CreateProduct {
            name: "Keyboard".to_string(),
            price: Decimal::new(4999, 2),
            description: Some("Mechanical".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_and_get_product() {
        let repo = InMemoryProductRepository::new();

        let product = repo.create(keyboard()).await.unwrap();
        assert_eq!(product.name, "Keyboard");
        assert_eq!(product.price, Decimal::new(4999, 2));

        let fetched = repo.get_by_id(product.id).await.unwrap();
        assert_eq!(fetched.unwrap(), product);
    }

    #[tokio::test]
    async fn test_duplicate_name_is_case_insensitive() {
        let repo = InMemoryProductRepository::new();
        repo.create(keyboard()).await.unwrap();

        let shouting = CreateProduct {
            name: "KEYBOARD".to_string(),
            price: Decimal::TEN,
            description: None,
        };

        let result = repo.create(shouting).await;
        assert!(matches!(result, Err(ProductError::DuplicateName(_))));
    }

    #[tokio::test]
    async fn test_exists_by_name_ignores_case() {
        let repo = InMemoryProductRepository::new();
        repo.create(keyboard()).await.unwrap();

        assert!(repo.exists_by_name("keyboard").await.unwrap());
        assert!(repo.exists_by_name("KeyBoard").await.unwrap());
        assert!(!repo.exists_by_name("Mouse").await.unwrap());
    }

    #[tokio::test]
    async fn test_update_replaces_fields_and_keeps_id() {
        let repo = InMemoryProductRepository::new();
        let created = repo.create(keyboard()).await.unwrap();

        let updated = repo
            .update(
                created.id,
                UpdateProduct {
                    name: Some("New".to_string()),
                    price: Some(Decimal::new(999, 2)),
                    description: Some("d".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "New");
        assert_eq!(updated.price, Decimal::new(999, 2));
        assert_eq!(updated.description, Some("d".to_string()));
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let repo = InMemoryProductRepository::new();

        let result = repo
            .update(Uuid::new_v4(), UpdateProduct::default())
            .await;
        assert!(matches!(result, Err(ProductError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let repo = InMemoryProductRepository::new();
        let created = repo.create(keyboard()).await.unwrap();

        assert!(repo.delete(created.id).await.unwrap());
        assert!(!repo.delete(created.id).await.unwrap());
    }
}
