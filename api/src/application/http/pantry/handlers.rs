pub mod add_item;
pub mod clear_items;
pub mod delete_item;
pub mod get_items;
pub mod suggest_recipes;
