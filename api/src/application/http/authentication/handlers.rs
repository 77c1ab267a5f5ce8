pub mod change_password;
pub mod delete_me;
pub mod get_me;
pub mod login;
pub mod logout;
pub mod refresh;
pub mod register;
pub mod update_me;
