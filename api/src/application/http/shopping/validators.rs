use mealadapt_core::domain::shopping::{
    entities::{GroceryCategory, ShoppingList},
    value_objects::NewShoppingItem,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct ShoppingItemRequest {
    #[validate(length(min = 1, max = 200, message = "ingredient must be between 1 and 200 characters"))]
    pub ingredient: String,
    pub quantity: Option<String>,
    pub category: Option<GroceryCategory>,
}

impl From<ShoppingItemRequest> for NewShoppingItem {
    fn from(request: ShoppingItemRequest) -> Self {
        Self {
            ingredient: request.ingredient,
            quantity: request.quantity,
            category: request.category,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateShoppingListRequest {
    #[validate(length(min = 1, max = 200, message = "name must be between 1 and 200 characters"))]
    pub name: String,
    #[serde(default)]
    #[validate(nested)]
    pub items: Vec<ShoppingItemRequest>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct GenerateShoppingListRequest {
    #[validate(length(min = 1, max = 200, message = "name must be between 1 and 200 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 20, message = "recipe_ids must hold between 1 and 20 ids"))]
    pub recipe_ids: Vec<Uuid>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateShoppingItemRequest {
    pub is_checked: Option<bool>,
    pub quantity: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ShoppingListsResponse {
    pub data: Vec<ShoppingList>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_items_are_validated() {
        let request: CreateShoppingListRequest = serde_json::from_value(serde_json::json!({
            "name": "Weekend",
            "items": [{"ingredient": "milk", "category": "dairy"}, {"ingredient": ""}]
        }))
        .unwrap();

        assert!(request.validate().is_err());
    }

    #[test]
    fn test_generate_requires_recipes() {
        let request = GenerateShoppingListRequest {
            name: "Week 12".to_string(),
            recipe_ids: vec![],
        };

        assert!(request.validate().is_err());
    }
}
