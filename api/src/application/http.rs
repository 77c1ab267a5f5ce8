pub mod authentication;
pub mod barcode;
pub mod family;
pub mod health;
pub mod meal_plan;
pub mod pantry;
pub mod rate_limit;
pub mod recipe;
pub mod saved_recipe;
pub mod scan;
pub mod server;
pub mod shopping;
