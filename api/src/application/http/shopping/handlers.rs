pub mod add_item;
pub mod complete_list;
pub mod create_list;
pub mod delete_item;
pub mod delete_list;
pub mod generate_list;
pub mod get_list;
pub mod get_lists;
pub mod update_item;
