//! Controladores: lógica de cada grupo de endpoints sobre los repositorios

pub mod auth_controller;
pub mod content_controller;
pub mod vehicle_controller;
