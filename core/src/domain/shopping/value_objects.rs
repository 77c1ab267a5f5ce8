use uuid::Uuid;

use crate::domain::shopping::entities::GroceryCategory;

pub struct NewShoppingItem {
    pub ingredient: String,
    pub quantity: Option<String>,
    pub category: Option<GroceryCategory>,
}

pub struct CreateShoppingListInput {
    pub name: String,
    pub items: Vec<NewShoppingItem>,
}

pub struct GenerateShoppingListInput {
    pub name: String,
    pub recipe_ids: Vec<Uuid>,
}

pub struct AddShoppingItemInput {
    pub list_id: Uuid,
    pub item: NewShoppingItem,
}

pub struct UpdateShoppingItemInput {
    pub item_id: Uuid,
    pub is_checked: Option<bool>,
    pub quantity: Option<String>,
}
