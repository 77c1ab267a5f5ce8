pub mod authentication;
pub mod barcode;
pub mod common;
pub mod crypto;
pub mod family;
pub mod health;
pub mod jwt;
pub mod llm;
pub mod meal_plan;
pub mod pantry;
pub mod prompt;
pub mod recipe_analysis;
pub mod saved_recipe;
pub mod scan;
pub mod shopping;
pub mod user;
