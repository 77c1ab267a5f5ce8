pub mod analyze_recipe;
