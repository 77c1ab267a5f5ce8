pub mod saved_recipe_repository;
