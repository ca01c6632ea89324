use async_trait::async_trait;
use sea_orm::sea_query::{Expr, ExprTrait, Func};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::{
    entity,
    error::{ProductError, ProductResult},
    models::{CreateProduct, Product, UpdateProduct},
    repository::ProductRepository,
};

/// PostgreSQL implementation of [`ProductRepository`]
pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let active_model: entity::ActiveModel = input.into();
        let model = active_model.insert(&self.db).await?;

        tracing::info!(product_id = %model.id, "Created product");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn list(&self) -> ProductResult<Vec<Product>> {
        // No ORDER BY: iteration order is whatever the store yields.
        let models = entity::Entity::find().all(&self.db).await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Product> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(ProductError::NotFound(id))?;

        let mut product: Product = model.into();
        product.apply_update(input);

        let active_model: entity::ActiveModel = product.into();
        let updated = active_model.update(&self.db).await?;

        tracing::info!(product_id = %id, "Updated product");
        Ok(updated.into())
    }

    async fn delete(&self, id: Uuid) -> ProductResult<bool> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!(product_id = %id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn exists_by_name(&self, name: &str) -> ProductResult<bool> {
        let exists = entity::Entity::find()
            .filter(Expr::expr(Func::lower(Expr::col(entity::Column::Name))).eq(name.to_lowercase()))
            .one(&self.db)
            .await?
            .is_some();

        Ok(exists)
    }
}
