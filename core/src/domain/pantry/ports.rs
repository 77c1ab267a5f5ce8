use std::future::Future;
use uuid::Uuid;

use crate::domain::{
    authentication::value_objects::Identity,
    common::entities::app_errors::CoreError,
    pantry::{
        entities::{PantryItem, RecipeSuggestions},
        value_objects::{AddPantryItemInput, SuggestRecipesInput},
    },
};

#[cfg_attr(test, mockall::automock)]
pub trait PantryRepository: Send + Sync {
    fn add_item(&self, item: PantryItem)
    -> impl Future<Output = Result<PantryItem, CoreError>> + Send;

    fn get_items(
        &self,
        user_id: Uuid,
    ) -> impl Future<Output = Result<Vec<PantryItem>, CoreError>> + Send;

    fn get_item(
        &self,
        item_id: Uuid,
        user_id: Uuid,
    ) -> impl Future<Output = Result<Option<PantryItem>, CoreError>> + Send;

    fn delete_item(
        &self,
        item_id: Uuid,
        user_id: Uuid,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn clear_items(&self, user_id: Uuid) -> impl Future<Output = Result<u64, CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait PantryService: Send + Sync {
    fn get_items(
        &self,
        identity: Identity,
    ) -> impl Future<Output = Result<Vec<PantryItem>, CoreError>> + Send;

    fn add_item(
        &self,
        identity: Identity,
        input: AddPantryItemInput,
    ) -> impl Future<Output = Result<PantryItem, CoreError>> + Send;

    fn delete_item(
        &self,
        identity: Identity,
        item_id: Uuid,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn clear_items(&self, identity: Identity)
    -> impl Future<Output = Result<u64, CoreError>> + Send;

    fn suggest_recipes(
        &self,
        identity: Identity,
        input: SuggestRecipesInput,
    ) -> impl Future<Output = Result<RecipeSuggestions, CoreError>> + Send;
}
