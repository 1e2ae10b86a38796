//! # Product Repository (tracked)

use async_trait::async_trait;
use depot_core::{measure, Product};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel, QueryOrder, Set,
};
use tracing::debug;

use super::entity::product;
use crate::error::DbResult;
use crate::repository::ProductRepository;

/// Product repository backed by sea-orm entities.
#[derive(Debug, Clone)]
pub struct TrackedProductRepository {
    db: DatabaseConnection,
}

impl TrackedProductRepository {
    /// Creates a new TrackedProductRepository.
    pub fn new(db: DatabaseConnection) -> Self {
        TrackedProductRepository { db }
    }
}

#[async_trait]
impl ProductRepository for TrackedProductRepository {
    async fn list_all(&self) -> DbResult<Vec<Product>> {
        let models = product::Entity::find()
            .order_by_asc(product::Column::Id)
            .all(&self.db)
            .await?;

        debug!(count = models.len(), "Listed products");

        let products = models
            .into_iter()
            .map(Product::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(products)
    }

    async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let model = product::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Product::try_from).transpose()?)
    }

    async fn add(&self, new: &Product) -> DbResult<()> {
        debug!(name = %new.name, "Inserting product");

        let model = product::ActiveModel {
            name: Set(new.name.clone()),
            description: Set(new.description.clone()),
            weight: Set(measure::encode(new.weight)),
            height: Set(measure::encode(new.height)),
            width: Set(measure::encode(new.width)),
            length: Set(measure::encode(new.length)),
            ..Default::default()
        };

        product::Entity::insert(model).exec(&self.db).await?;
        Ok(())
    }

    async fn update(&self, changed: &Product) -> DbResult<()> {
        debug!(id = changed.id, "Updating product");

        let Some(existing) = product::Entity::find_by_id(changed.id).one(&self.db).await? else {
            debug!(id = changed.id, "No product to update");
            return Ok(());
        };

        let mut model = existing.into_active_model();
        model.name = Set(changed.name.clone());
        model.description = Set(changed.description.clone());
        model.weight = Set(measure::encode(changed.weight));
        model.height = Set(measure::encode(changed.height));
        model.width = Set(measure::encode(changed.width));
        model.length = Set(measure::encode(changed.length));

        match model.update(&self.db).await {
            // Row went away between the load and the write
            Err(DbErr::RecordNotUpdated) => Ok(()),
            other => other.map(|_| ()).map_err(Into::into),
        }
    }

    async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting product");

        let result = product::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            debug!(id, "No product to delete");
        }

        Ok(())
    }
}
