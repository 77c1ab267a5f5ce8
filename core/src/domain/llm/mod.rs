pub mod entities;
pub mod invoker;
pub mod payload;
pub mod ports;
pub mod rate_limit;
pub mod retry;
pub mod services;
