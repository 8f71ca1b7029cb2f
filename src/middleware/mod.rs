//! Middleware del sistema
//!
//! Autenticación por JWT (extractores) y CORS.

pub mod auth;
pub mod cors;

pub use auth::{AdminUser, AuthenticatedUser};
pub use cors::cors_layer;
