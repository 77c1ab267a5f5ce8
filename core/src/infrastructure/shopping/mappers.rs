use crate::{
    domain::shopping::entities::{GroceryCategory, ShoppingItem, ShoppingList},
    entity::{shopping_items, shopping_lists},
};

impl From<shopping_items::Model> for ShoppingItem {
    fn from(model: shopping_items::Model) -> Self {
        Self {
            id: model.id,
            list_id: model.list_id,
            ingredient: model.ingredient,
            quantity: model.quantity,
            // Unknown stored categories degrade to no category.
            category: model.category.as_deref().and_then(GroceryCategory::parse),
            is_checked: model.is_checked,
            source_recipe_id: model.source_recipe_id,
        }
    }
}

pub fn map_list(model: shopping_lists::Model, items: Vec<shopping_items::Model>) -> ShoppingList {
    ShoppingList {
        id: model.id,
        user_id: model.user_id,
        name: model.name,
        items: items.into_iter().map(ShoppingItem::from).collect(),
        created_at: model.created_at.to_utc(),
        completed_at: model.completed_at.map(|at| at.to_utc()),
    }
}
