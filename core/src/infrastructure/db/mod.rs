pub mod json;
pub mod postgres;
