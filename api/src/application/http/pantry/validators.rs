use mealadapt_core::domain::pantry::entities::PantryItem;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct AddPantryItemRequest {
    #[validate(length(min = 1, max = 200, message = "name must be between 1 and 200 characters"))]
    pub name: String,
    #[validate(length(max = 50, message = "category must be at most 50 characters"))]
    pub category: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct SuggestRecipesRequest {
    /// Ingredients to cook with. Omit to use the stored pantry.
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "ingredients must hold between 1 and 100 entries"))]
    pub ingredients: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct PantryItemsResponse {
    pub data: Vec<PantryItem>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ClearPantryResponse {
    pub deleted: u64,
}
