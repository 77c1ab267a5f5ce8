pub mod delete_saved_recipe;
pub mod get_saved_recipe;
pub mod get_saved_recipes;
pub mod save_recipe;
pub mod update_saved_recipe;
