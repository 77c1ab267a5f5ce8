pub mod builder;
pub mod entities;
pub mod schema;
