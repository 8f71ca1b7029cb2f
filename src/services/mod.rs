//! Servicios
//!
//! Lógica sin estado HTTP: construcción de consultas del catálogo,
//! procesado de imágenes y almacén de archivos.

pub mod asset_store;
pub mod image_processor;
pub mod vehicle_query;
