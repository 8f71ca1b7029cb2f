//! Módulo de base de datos
//!
//! Maneja la conexión con PostgreSQL y el almacén en memoria alternativo

pub mod connection;
pub mod memory;

pub use connection::DatabaseConnection;
pub use memory::MemoryStore;
