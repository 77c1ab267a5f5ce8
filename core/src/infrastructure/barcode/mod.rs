pub mod cached_catalog;
pub mod open_food_facts;
pub mod repositories;
