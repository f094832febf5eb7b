// src/presentation/http/middleware/mod.rs
pub mod auth;
pub mod rate_limit;

pub use auth::require_authentication;
pub use rate_limit::rate_limit_layer;
