use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::common::generate_timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum GroceryCategory {
    Produce,
    Dairy,
    Meat,
    Seafood,
    Pantry,
    Bakery,
    Frozen,
    Beverages,
    Other,
}

impl GroceryCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroceryCategory::Produce => "produce",
            GroceryCategory::Dairy => "dairy",
            GroceryCategory::Meat => "meat",
            GroceryCategory::Seafood => "seafood",
            GroceryCategory::Pantry => "pantry",
            GroceryCategory::Bakery => "bakery",
            GroceryCategory::Frozen => "frozen",
            GroceryCategory::Beverages => "beverages",
            GroceryCategory::Other => "other",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        serde_json::from_value(serde_json::Value::String(value.trim().to_lowercase())).ok()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ShoppingItem {
    pub id: Uuid,
    pub list_id: Uuid,
    pub ingredient: String,
    pub quantity: Option<String>,
    pub category: Option<GroceryCategory>,
    pub is_checked: bool,
    pub source_recipe_id: Option<Uuid>,
}

impl ShoppingItem {
    pub fn new(
        list_id: Uuid,
        ingredient: String,
        quantity: Option<String>,
        category: Option<GroceryCategory>,
        source_recipe_id: Option<Uuid>,
    ) -> Self {
        let (_, timestamp) = generate_timestamp();

        Self {
            id: Uuid::new_v7(timestamp),
            list_id,
            ingredient,
            quantity,
            category,
            is_checked: false,
            source_recipe_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ShoppingList {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub items: Vec<ShoppingItem>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl ShoppingList {
    pub fn new(user_id: Uuid, name: String) -> Self {
        let (now, timestamp) = generate_timestamp();

        Self {
            id: Uuid::new_v7(timestamp),
            user_id,
            name,
            items: Vec::new(),
            created_at: now,
            completed_at: None,
        }
    }
}

/// One consolidated ingredient extracted from a set of recipes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct ExtractedIngredient {
    pub ingredient: String,
    pub quantity: String,
    pub category: GroceryCategory,
}
