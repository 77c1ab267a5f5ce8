use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use tracing::error;
use uuid::Uuid;

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        pantry::{entities::PantryItem, ports::PantryRepository},
    },
    entity::pantry_items::{ActiveModel, Column, Entity},
};

#[derive(Debug, Clone)]
pub struct PostgresPantryRepository {
    pub db: DatabaseConnection,
}

impl PostgresPantryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl PantryRepository for PostgresPantryRepository {
    async fn add_item(&self, item: PantryItem) -> Result<PantryItem, CoreError> {
        let active_model = ActiveModel {
            id: Set(item.id),
            user_id: Set(item.user_id),
            name: Set(item.name),
            category: Set(item.category),
            created_at: Set(item.created_at.fixed_offset()),
        };

        let created = Entity::insert(active_model)
            .exec_with_returning(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to add pantry item: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(created.into())
    }

    async fn get_items(&self, user_id: Uuid) -> Result<Vec<PantryItem>, CoreError> {
        let items = Entity::find()
            .filter(Column::UserId.eq(user_id))
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to list pantry items: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(items.into_iter().map(PantryItem::from).collect())
    }

    async fn get_item(&self, item_id: Uuid, user_id: Uuid) -> Result<Option<PantryItem>, CoreError> {
        let item = Entity::find()
            .filter(Column::Id.eq(item_id))
            .filter(Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to get pantry item: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(item.map(PantryItem::from))
    }

    async fn delete_item(&self, item_id: Uuid, user_id: Uuid) -> Result<(), CoreError> {
        Entity::delete_many()
            .filter(Column::Id.eq(item_id))
            .filter(Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to delete pantry item: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(())
    }

    async fn clear_items(&self, user_id: Uuid) -> Result<u64, CoreError> {
        let result = Entity::delete_many()
            .filter(Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to clear pantry: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(result.rows_affected)
    }
}
