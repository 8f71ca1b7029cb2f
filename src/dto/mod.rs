//! Objetos de transferencia de la API

pub mod auth_dto;
pub mod content_dto;
pub mod vehicle_dto;
