use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, TransactionTrait, sea_query::Expr,
};
use tracing::error;
use uuid::Uuid;

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        shopping::{
            entities::{ShoppingItem, ShoppingList},
            ports::ShoppingListRepository,
        },
    },
    entity::{
        shopping_items::{
            ActiveModel as ItemActiveModel, Column as ItemColumn, Entity as ItemEntity,
        },
        shopping_lists::{ActiveModel, Column, Entity},
    },
    infrastructure::shopping::mappers::map_list,
};

#[derive(Debug, Clone)]
pub struct PostgresShoppingListRepository {
    pub db: DatabaseConnection,
}

impl PostgresShoppingListRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn item_active_model(item: &ShoppingItem) -> ItemActiveModel {
    ItemActiveModel {
        id: Set(item.id),
        list_id: Set(item.list_id),
        ingredient: Set(item.ingredient.clone()),
        quantity: Set(item.quantity.clone()),
        category: Set(item.category.map(|c| c.as_str().to_string())),
        is_checked: Set(item.is_checked),
        source_recipe_id: Set(item.source_recipe_id),
    }
}

impl ShoppingListRepository for PostgresShoppingListRepository {
    async fn create_list(&self, list: ShoppingList) -> Result<ShoppingList, CoreError> {
        let txn = self.db.begin().await.map_err(|e| {
            error!("Failed to open transaction: {}", e);
            CoreError::InternalServerError
        })?;

        let active_model = ActiveModel {
            id: Set(list.id),
            user_id: Set(list.user_id),
            name: Set(list.name.clone()),
            created_at: Set(list.created_at.fixed_offset()),
            completed_at: Set(list.completed_at.map(|at| at.fixed_offset())),
        };

        Entity::insert(active_model)
            .exec(&txn)
            .await
            .map_err(|e| {
                error!("Failed to create shopping list: {}", e);
                CoreError::InternalServerError
            })?;

        if !list.items.is_empty() {
            ItemEntity::insert_many(list.items.iter().map(item_active_model))
                .exec(&txn)
                .await
                .map_err(|e| {
                    error!("Failed to create shopping items: {}", e);
                    CoreError::InternalServerError
                })?;
        }

        txn.commit().await.map_err(|e| {
            error!("Failed to commit shopping list: {}", e);
            CoreError::InternalServerError
        })?;

        Ok(list)
    }

    async fn get_lists(&self, user_id: Uuid) -> Result<Vec<ShoppingList>, CoreError> {
        let lists = Entity::find()
            .filter(Column::UserId.eq(user_id))
            .order_by_desc(Column::CreatedAt)
            .find_with_related(ItemEntity)
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to list shopping lists: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(lists
            .into_iter()
            .map(|(list, items)| map_list(list, items))
            .collect())
    }

    async fn get_list(&self, list_id: Uuid, user_id: Uuid) -> Result<Option<ShoppingList>, CoreError> {
        let list = Entity::find()
            .filter(Column::Id.eq(list_id))
            .filter(Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to get shopping list: {}", e);
                CoreError::InternalServerError
            })?;

        let Some(list) = list else {
            return Ok(None);
        };

        let items = list
            .find_related(ItemEntity)
            .order_by_asc(ItemColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to load shopping items: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(Some(map_list(list, items)))
    }

    async fn delete_list(&self, list_id: Uuid, user_id: Uuid) -> Result<(), CoreError> {
        Entity::delete_many()
            .filter(Column::Id.eq(list_id))
            .filter(Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to delete shopping list: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(())
    }

    async fn complete_list(&self, list_id: Uuid, completed_at: DateTime<Utc>) -> Result<(), CoreError> {
        Entity::update_many()
            .col_expr(Column::CompletedAt, Expr::value(completed_at.fixed_offset()))
            .filter(Column::Id.eq(list_id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to complete shopping list: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(())
    }

    async fn add_item(&self, item: ShoppingItem) -> Result<ShoppingItem, CoreError> {
        let created = ItemEntity::insert(item_active_model(&item))
            .exec_with_returning(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to add shopping item: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(created.into())
    }

    async fn get_item(&self, item_id: Uuid, user_id: Uuid) -> Result<Option<ShoppingItem>, CoreError> {
        let item = ItemEntity::find_by_id(item_id)
            .find_also_related(Entity)
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to get shopping item: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(item.and_then(|(item, list)| {
            list.filter(|l| l.user_id == user_id)
                .map(|_| ShoppingItem::from(item))
        }))
    }

    async fn update_item(&self, item: ShoppingItem) -> Result<ShoppingItem, CoreError> {
        let updated = ItemEntity::update(item_active_model(&item))
            .exec(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to update shopping item: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(updated.into())
    }

    async fn delete_item(&self, item_id: Uuid) -> Result<(), CoreError> {
        ItemEntity::delete_by_id(item_id)
            .exec(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to delete shopping item: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(())
    }
}
