pub mod get_usage;
