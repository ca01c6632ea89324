//! Product Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use axum_helpers::first_violation;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, ProductDto, UpdateProduct};
use crate::repository::ProductRepository;

/// Product service providing business logic operations
///
/// Owns the business rules (name uniqueness, existence checks) and maps
/// entities to their outbound representation. Failures are typed; status
/// codes are chosen only at the transport boundary.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    /// Create a new ProductService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// List all products, in store iteration order
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> ProductResult<Vec<ProductDto>> {
        let products = self.repository.list().await?;
        Ok(products.into_iter().map(ProductDto::from).collect())
    }

    /// Get a product by ID
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: Uuid) -> ProductResult<ProductDto> {
        self.repository
            .get_by_id(id)
            .await?
            .map(ProductDto::from)
            .ok_or(ProductError::NotFound(id))
    }

    /// Create a new product
    ///
    /// Fails if another product already uses the name, compared ignoring
    /// case. The scan and the insert are not atomic; two concurrent creators
    /// can both pass the scan.
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<ProductDto> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(first_violation(&e)))?;

        if self.repository.exists_by_name(&input.name).await? {
            return Err(ProductError::DuplicateName(input.name));
        }

        let product = self.repository.create(input).await?;
        Ok(product.into())
    }

    /// Update an existing product
    ///
    /// Supplied fields fully replace the stored values; the identifier is
    /// immutable. The name is not re-checked for uniqueness here.
    #[instrument(skip(self, input))]
    pub async fn update_product(
        &self,
        id: Uuid,
        input: UpdateProduct,
    ) -> ProductResult<ProductDto> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(first_violation(&e)))?;

        if self.repository.get_by_id(id).await?.is_none() {
            return Err(ProductError::NotFound(id));
        }

        let product = self.repository.update(id, input).await?;
        Ok(product.into())
    }

    /// Delete a product
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: Uuid) -> ProductResult<()> {
        let deleted = self.repository.delete(id).await?;

        if !deleted {
            return Err(ProductError::NotFound(id));
        }

        Ok(())
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Product;
    use crate::repository::MockProductRepository;
    use mockall::predicate::eq;
    use rust_decimal::Decimal;

    fn keyboard_input() -> CreateProduct {
        CreateProduct {
            name: "Keyboard".to_string(),
            price: Decimal::new(4999, 2),
            description: Some("Mechanical".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_returns_dto_with_assigned_id() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_exists_by_name()
            .withf(|name| name == "Keyboard")
            .returning(|_| Ok(false));
        mock_repo
            .expect_create()
            .returning(|input| Ok(Product::new(input)));

        let service = ProductService::new(mock_repo);
        let dto = service.create_product(keyboard_input()).await.unwrap();

        assert_eq!(dto.name, "Keyboard");
        assert_eq!(dto.price, Decimal::new(4999, 2));
        assert_eq!(dto.description, Some("Mechanical".to_string()));
        assert!(dto.links.is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_name() {
        let mut mock_repo = MockProductRepository::new();
        // Repository reports a case-insensitive match; create must not run.
        mock_repo
            .expect_exists_by_name()
            .withf(|name| name == "Keyboard")
            .returning(|_| Ok(true));

        let service = ProductService::new(mock_repo);
        let result = service.create_product(keyboard_input()).await;

        assert!(matches!(result, Err(ProductError::DuplicateName(_))));
    }

    #[tokio::test]
    async fn test_create_rejects_nonpositive_price_before_store() {
        // No expectations: any repository call would panic the test.
        let mock_repo = MockProductRepository::new();
        let service = ProductService::new(mock_repo);

        let input = CreateProduct {
            name: "Keyboard".to_string(),
            price: Decimal::ZERO,
            description: None,
        };

        match service.create_product(input).await {
            Err(ProductError::Validation(msg)) => {
                assert_eq!(msg, "Price must be greater than zero");
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_rejects_blank_name_before_store() {
        let mock_repo = MockProductRepository::new();
        let service = ProductService::new(mock_repo);

        let input = CreateProduct {
            name: "  ".to_string(),
            price: Decimal::ONE,
            description: None,
        };

        match service.create_product(input).await {
            Err(ProductError::Validation(msg)) => {
                assert_eq!(msg, "Product name cannot be blank");
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get_missing_product_is_not_found() {
        let mut mock_repo = MockProductRepository::new();
        let id = Uuid::now_v7();
        mock_repo
            .expect_get_by_id()
            .with(eq(id))
            .returning(|_| Ok(None));

        let service = ProductService::new(mock_repo);
        let result = service.get_product(id).await;

        assert!(matches!(result, Err(ProductError::NotFound(missing)) if missing == id));
    }

    #[tokio::test]
    async fn test_update_missing_product_is_not_found() {
        let mut mock_repo = MockProductRepository::new();
        let id = Uuid::now_v7();
        mock_repo
            .expect_get_by_id()
            .with(eq(id))
            .returning(|_| Ok(None));

        let service = ProductService::new(mock_repo);
        let result = service.update_product(id, UpdateProduct::default()).await;

        assert!(matches!(result, Err(ProductError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_rejects_negative_price_before_store() {
        let mock_repo = MockProductRepository::new();
        let service = ProductService::new(mock_repo);

        let input = UpdateProduct {
            price: Some(Decimal::new(-500, 2)),
            ..Default::default()
        };

        match service.update_product(Uuid::now_v7(), input).await {
            Err(ProductError::Validation(msg)) => {
                assert_eq!(msg, "Price must be positive");
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_delete_missing_product_is_not_found() {
        let mut mock_repo = MockProductRepository::new();
        let id = Uuid::now_v7();
        mock_repo.expect_delete().with(eq(id)).returning(|_| Ok(false));

        let service = ProductService::new(mock_repo);
        let result = service.delete_product(id).await;

        assert!(matches!(result, Err(ProductError::NotFound(_))));
    }
}
