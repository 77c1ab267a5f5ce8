pub mod barcode;
pub mod crypto;
pub mod db;
pub mod family;
pub mod health;
pub mod jwt;
pub mod llm;
pub mod meal_plan;
pub mod pantry;
pub mod rate_limit;
pub mod saved_recipe;
pub mod shopping;
pub mod user;
