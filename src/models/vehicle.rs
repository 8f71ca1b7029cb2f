//! Modelo de Vehicle
//!
//! Este módulo contiene el documento Vehicle, sus imágenes y los datos
//! descriptivos que se reemplazan completos en cada actualización.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Tipo de vehículo: nuevo u ocasión
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    #[serde(alias = "nuevo")]
    New,
    #[serde(alias = "ocasion")]
    Used,
}

impl VehicleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleType::New => "new",
            VehicleType::Used => "used",
        }
    }
}

impl FromStr for VehicleType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "new" | "nuevo" => Ok(VehicleType::New),
            "used" | "ocasion" => Ok(VehicleType::Used),
            other => Err(format!("Tipo de vehículo desconocido: {}", other)),
        }
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Estado comercial del vehículo
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum VehicleStatus {
    #[default]
    Available,
    Sold,
    Hidden,
}

impl VehicleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::Available => "available",
            VehicleStatus::Sold => "sold",
            VehicleStatus::Hidden => "hidden",
        }
    }
}

impl FromStr for VehicleStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "available" => Ok(VehicleStatus::Available),
            "sold" => Ok(VehicleStatus::Sold),
            "hidden" => Ok(VehicleStatus::Hidden),
            other => Err(format!("Estado de vehículo desconocido: {}", other)),
        }
    }
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Imagen asociada a un vehículo. Solo existe dentro de su documento.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VehicleImage {
    pub id: Uuid,
    pub filename: String,
    pub url: String,
    pub thumbnail_url: String,
    #[serde(default)]
    pub is_primary: bool,
}

fn default_warranty_months() -> i32 {
    12
}

/// Datos descriptivos del vehículo.
///
/// Es a la vez el cuerpo de creación y el de actualización: una
/// actualización reemplaza todos estos campos de una vez.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct VehicleDetails {
    #[validate(length(min = 1, max = 100))]
    pub brand: String,

    #[validate(length(min = 1, max = 100))]
    pub model: String,

    #[validate(range(min = 1900, max = 2100))]
    pub year: i32,

    #[validate(range(min = 0.0))]
    pub price: f64,

    #[validate(range(min = 0))]
    pub kilometers: i32,

    #[validate(length(min = 1, max = 50))]
    pub fuel_type: String,

    #[validate(length(min = 1, max = 50))]
    pub transmission: String,

    #[validate(length(min = 1, max = 50))]
    pub color: String,

    #[validate(range(min = 0, max = 5000))]
    pub power_hp: i32,

    #[validate(range(min = 1, max = 9))]
    pub doors: i32,

    #[validate(range(min = 1, max = 99))]
    pub seats: i32,

    #[validate(range(min = 0))]
    pub trunk_volume: Option<i32>,

    #[serde(default = "default_warranty_months")]
    #[validate(range(min = 0, max = 240))]
    pub warranty_months: i32,

    pub vehicle_type: VehicleType,

    #[serde(default)]
    pub status: VehicleStatus,

    #[validate(length(max = 10000))]
    pub description: String,

    #[serde(default)]
    pub features: Vec<String>,
}

impl VehicleDetails {
    pub fn slug(&self) -> String {
        create_slug(&self.brand, &self.model, self.year)
    }
}

/// Documento Vehicle completo
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vehicle {
    pub id: Uuid,
    pub slug: String,
    #[serde(flatten)]
    pub details: VehicleDetails,
    #[serde(default)]
    pub images: Vec<VehicleImage>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Vehicle {
    /// Crear un vehículo nuevo con id y timestamps generados
    pub fn new(details: VehicleDetails) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            slug: details.slug(),
            details,
            images: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn find_image(&self, image_id: Uuid) -> Option<&VehicleImage> {
        self.images.iter().find(|image| image.id == image_id)
    }
}

/// Slug legible `{año}-{marca}-{modelo}` en minúsculas y con guiones.
///
/// No se garantiza unicidad: dos vehículos con la misma marca, modelo y año
/// comparten slug y la búsqueda por slug devuelve el primero.
pub fn create_slug(brand: &str, model: &str, year: i32) -> String {
    format!("{}-{}-{}", year, brand, model)
        .to_lowercase()
        .replace(' ', "-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::sample_details;

    #[test]
    fn test_slug_is_deterministic() {
        assert_eq!(create_slug("BMW", "X5", 2023), "2023-bmw-x5");
        assert_eq!(create_slug("Land Rover", "Range Rover Sport", 2021), "2021-land-rover-range-rover-sport");
        assert_eq!(create_slug("BMW", "X5", 2023), create_slug("BMW", "X5", 2023));
    }

    #[test]
    fn test_new_vehicle_has_slug_and_timestamps() {
        let vehicle = Vehicle::new(sample_details());
        assert_eq!(vehicle.slug, "2023-bmw-x5");
        assert!(vehicle.images.is_empty());
        assert_eq!(vehicle.created_at, vehicle.updated_at);
    }

    #[test]
    fn test_vehicle_serializes_flat() {
        let vehicle = Vehicle::new(sample_details());
        let json = serde_json::to_value(&vehicle).unwrap();
        assert_eq!(json["brand"], "BMW");
        assert_eq!(json["status"], "available");
        assert_eq!(json["vehicle_type"], "new");
        assert_eq!(json["features"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_details_defaults_and_aliases() {
        let details: VehicleDetails = serde_json::from_value(serde_json::json!({
            "brand": "Seat", "model": "Ibiza", "year": 2019, "price": 12000.0,
            "kilometers": 45000, "fuel_type": "gasolina", "transmission": "manual",
            "color": "rojo", "power_hp": 95, "doors": 5, "seats": 5,
            "vehicle_type": "ocasion", "description": ""
        }))
        .unwrap();

        assert_eq!(details.vehicle_type, VehicleType::Used);
        assert_eq!(details.status, VehicleStatus::Available);
        assert_eq!(details.warranty_months, 12);
        assert!(details.features.is_empty());
        assert!(details.validate().is_ok());
    }

    #[test]
    fn test_details_validation() {
        let mut details = sample_details();
        details.year = 1800;
        details.brand = String::new();
        let errors = details.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("year"));
        assert!(fields.contains_key("brand"));
    }

    #[test]
    fn test_status_and_type_parsing() {
        assert_eq!("HIDDEN".parse::<VehicleStatus>().unwrap(), VehicleStatus::Hidden);
        assert_eq!("nuevo".parse::<VehicleType>().unwrap(), VehicleType::New);
        assert!("reserved".parse::<VehicleStatus>().is_err());
    }
}
