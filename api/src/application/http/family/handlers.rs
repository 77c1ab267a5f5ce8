pub mod add_member;
pub mod delete_member;
pub mod get_profile;
pub mod replace_profile;
pub mod update_member;
