pub mod entities;
pub mod ports;
pub mod services;
pub mod validator;
pub mod value_objects;
