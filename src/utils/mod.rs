//! Utilidades del sistema
//!
//! Manejo de errores y JWT.

pub mod errors;
pub mod jwt;
