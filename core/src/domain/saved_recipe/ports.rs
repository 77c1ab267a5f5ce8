use std::future::Future;
use uuid::Uuid;

use crate::domain::{
    authentication::value_objects::Identity,
    common::entities::app_errors::CoreError,
    saved_recipe::{
        entities::SavedRecipe,
        value_objects::{GetSavedRecipesFilter, SaveRecipeInput, UpdateSavedRecipeInput},
    },
};

#[cfg_attr(test, mockall::automock)]
pub trait SavedRecipeRepository: Send + Sync {
    fn create_recipe(
        &self,
        recipe: SavedRecipe,
    ) -> impl Future<Output = Result<SavedRecipe, CoreError>> + Send;

    fn update_recipe(
        &self,
        recipe: SavedRecipe,
    ) -> impl Future<Output = Result<SavedRecipe, CoreError>> + Send;

    fn delete_recipe(
        &self,
        recipe_id: Uuid,
        user_id: Uuid,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn get_recipe(
        &self,
        recipe_id: Uuid,
        user_id: Uuid,
    ) -> impl Future<Output = Result<Option<SavedRecipe>, CoreError>> + Send;

    /// Newest first.
    fn get_recipes_by_user(
        &self,
        user_id: Uuid,
        favorites_only: bool,
    ) -> impl Future<Output = Result<Vec<SavedRecipe>, CoreError>> + Send;

    fn get_recipes_by_ids(
        &self,
        user_id: Uuid,
        recipe_ids: Vec<Uuid>,
    ) -> impl Future<Output = Result<Vec<SavedRecipe>, CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait SavedRecipeService: Send + Sync {
    fn save_recipe(
        &self,
        identity: Identity,
        input: SaveRecipeInput,
    ) -> impl Future<Output = Result<SavedRecipe, CoreError>> + Send;

    /// Returns the requested page and the total number of matching recipes.
    fn get_saved_recipes(
        &self,
        identity: Identity,
        filter: GetSavedRecipesFilter,
    ) -> impl Future<Output = Result<(Vec<SavedRecipe>, usize), CoreError>> + Send;

    fn get_saved_recipe(
        &self,
        identity: Identity,
        recipe_id: Uuid,
    ) -> impl Future<Output = Result<SavedRecipe, CoreError>> + Send;

    fn update_saved_recipe(
        &self,
        identity: Identity,
        input: UpdateSavedRecipeInput,
    ) -> impl Future<Output = Result<SavedRecipe, CoreError>> + Send;

    fn delete_saved_recipe(
        &self,
        identity: Identity,
        recipe_id: Uuid,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;
}
