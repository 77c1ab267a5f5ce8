use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use tracing::error;
use uuid::Uuid;

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        saved_recipe::{entities::SavedRecipe, ports::SavedRecipeRepository},
    },
    entity::saved_recipes::{ActiveModel, Column, Entity},
    infrastructure::db::json::to_json,
};

#[derive(Debug, Clone)]
pub struct PostgresSavedRecipeRepository {
    pub db: DatabaseConnection,
}

impl PostgresSavedRecipeRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn active_model(recipe: &SavedRecipe) -> Result<ActiveModel, CoreError> {
        let analysis = recipe
            .analysis
            .as_ref()
            .map(|analysis| to_json(analysis, "analysis"))
            .transpose()?;

        Ok(ActiveModel {
            id: Set(recipe.id),
            user_id: Set(recipe.user_id),
            dish_name: Set(recipe.dish_name.clone()),
            recipe_text: Set(recipe.recipe_text.clone()),
            analysis: Set(analysis),
            is_favorite: Set(recipe.is_favorite),
            notes: Set(recipe.notes.clone()),
            tags: Set(to_json(&recipe.tags, "tags")?),
            created_at: Set(recipe.created_at.fixed_offset()),
            updated_at: Set(recipe.updated_at.fixed_offset()),
        })
    }
}

impl SavedRecipeRepository for PostgresSavedRecipeRepository {
    async fn create_recipe(&self, recipe: SavedRecipe) -> Result<SavedRecipe, CoreError> {
        let created = Entity::insert(Self::active_model(&recipe)?)
            .exec_with_returning(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to save recipe: {}", e);
                CoreError::InternalServerError
            })?;

        SavedRecipe::try_from(created)
    }

    async fn update_recipe(&self, recipe: SavedRecipe) -> Result<SavedRecipe, CoreError> {
        let updated = Entity::update(Self::active_model(&recipe)?)
            .filter(Column::UserId.eq(recipe.user_id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to update saved recipe: {}", e);
                CoreError::InternalServerError
            })?;

        SavedRecipe::try_from(updated)
    }

    async fn delete_recipe(&self, recipe_id: Uuid, user_id: Uuid) -> Result<(), CoreError> {
        Entity::delete_many()
            .filter(Column::Id.eq(recipe_id))
            .filter(Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to delete saved recipe: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(())
    }

    async fn get_recipe(
        &self,
        recipe_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<SavedRecipe>, CoreError> {
        let recipe = Entity::find()
            .filter(Column::Id.eq(recipe_id))
            .filter(Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to get saved recipe: {}", e);
                CoreError::InternalServerError
            })?;

        recipe.map(SavedRecipe::try_from).transpose()
    }

    async fn get_recipes_by_user(
        &self,
        user_id: Uuid,
        favorites_only: bool,
    ) -> Result<Vec<SavedRecipe>, CoreError> {
        let mut query = Entity::find().filter(Column::UserId.eq(user_id));
        if favorites_only {
            query = query.filter(Column::IsFavorite.eq(true));
        }

        let recipes = query
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to list saved recipes: {}", e);
                CoreError::InternalServerError
            })?;

        recipes.into_iter().map(SavedRecipe::try_from).collect()
    }

    async fn get_recipes_by_ids(
        &self,
        user_id: Uuid,
        recipe_ids: Vec<Uuid>,
    ) -> Result<Vec<SavedRecipe>, CoreError> {
        if recipe_ids.is_empty() {
            return Ok(Vec::new());
        }

        let recipes = Entity::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::Id.is_in(recipe_ids))
            .order_by_asc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to load saved recipes: {}", e);
                CoreError::InternalServerError
            })?;

        recipes.into_iter().map(SavedRecipe::try_from).collect()
    }
}
