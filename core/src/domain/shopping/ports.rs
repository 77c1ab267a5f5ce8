use std::future::Future;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{
    authentication::value_objects::Identity,
    common::entities::app_errors::CoreError,
    shopping::{
        entities::{ShoppingItem, ShoppingList},
        value_objects::{
            AddShoppingItemInput, CreateShoppingListInput, GenerateShoppingListInput,
            UpdateShoppingItemInput,
        },
    },
};

#[cfg_attr(test, mockall::automock)]
pub trait ShoppingListRepository: Send + Sync {
    /// Persists the list together with its items.
    fn create_list(
        &self,
        list: ShoppingList,
    ) -> impl Future<Output = Result<ShoppingList, CoreError>> + Send;

    fn get_lists(
        &self,
        user_id: Uuid,
    ) -> impl Future<Output = Result<Vec<ShoppingList>, CoreError>> + Send;

    fn get_list(
        &self,
        list_id: Uuid,
        user_id: Uuid,
    ) -> impl Future<Output = Result<Option<ShoppingList>, CoreError>> + Send;

    fn delete_list(
        &self,
        list_id: Uuid,
        user_id: Uuid,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn complete_list(
        &self,
        list_id: Uuid,
        completed_at: DateTime<Utc>,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn add_item(
        &self,
        item: ShoppingItem,
    ) -> impl Future<Output = Result<ShoppingItem, CoreError>> + Send;

    /// Only returns the item when its list belongs to `user_id`.
    fn get_item(
        &self,
        item_id: Uuid,
        user_id: Uuid,
    ) -> impl Future<Output = Result<Option<ShoppingItem>, CoreError>> + Send;

    fn update_item(
        &self,
        item: ShoppingItem,
    ) -> impl Future<Output = Result<ShoppingItem, CoreError>> + Send;

    fn delete_item(&self, item_id: Uuid) -> impl Future<Output = Result<(), CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait ShoppingService: Send + Sync {
    fn create_list(
        &self,
        identity: Identity,
        input: CreateShoppingListInput,
    ) -> impl Future<Output = Result<ShoppingList, CoreError>> + Send;

    fn generate_list(
        &self,
        identity: Identity,
        input: GenerateShoppingListInput,
    ) -> impl Future<Output = Result<ShoppingList, CoreError>> + Send;

    fn get_lists(
        &self,
        identity: Identity,
    ) -> impl Future<Output = Result<Vec<ShoppingList>, CoreError>> + Send;

    fn get_list(
        &self,
        identity: Identity,
        list_id: Uuid,
    ) -> impl Future<Output = Result<ShoppingList, CoreError>> + Send;

    fn delete_list(
        &self,
        identity: Identity,
        list_id: Uuid,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn complete_list(
        &self,
        identity: Identity,
        list_id: Uuid,
    ) -> impl Future<Output = Result<ShoppingList, CoreError>> + Send;

    fn add_item(
        &self,
        identity: Identity,
        input: AddShoppingItemInput,
    ) -> impl Future<Output = Result<ShoppingItem, CoreError>> + Send;

    fn update_item(
        &self,
        identity: Identity,
        input: UpdateShoppingItemInput,
    ) -> impl Future<Output = Result<ShoppingItem, CoreError>> + Send;

    fn delete_item(
        &self,
        identity: Identity,
        item_id: Uuid,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;
}
