pub mod add_meal;
pub mod delete_meal;
pub mod generate_shopping;
pub mod get_week;
pub mod update_meal;
