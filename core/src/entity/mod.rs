pub mod barcode_cache;
pub mod family_members;
pub mod meal_plans;
pub mod pantry_items;
pub mod planned_meals;
pub mod refresh_tokens;
pub mod saved_recipes;
pub mod shopping_items;
pub mod shopping_lists;
pub mod users;
