use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::vehicle::{VehicleImage, VehicleStatus, VehicleType};
use crate::services::vehicle_query::{SortField, SortOrder, VehicleFilter, VehicleQuery, DEFAULT_LIMIT};

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

// Parámetros del listado público de vehículos
#[derive(Debug, Deserialize, Validate)]
pub struct VehicleListQuery {
    pub brand: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_year: Option<i32>,
    pub max_year: Option<i32>,
    pub fuel_type: Option<String>,
    pub transmission: Option<String>,
    pub vehicle_type: Option<VehicleType>,
    pub status: Option<VehicleStatus>,

    #[serde(default)]
    #[validate(range(min = 0))]
    pub skip: i64,

    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100))]
    pub limit: i64,

    // Fuera de la lista permitida falla la deserialización (400)
    #[serde(default)]
    pub sort_by: SortField,

    #[serde(default)]
    pub sort_order: SortOrder,
}

impl VehicleListQuery {
    pub fn into_query(self) -> VehicleQuery {
        let filter = VehicleFilter {
            brand: self.brand,
            min_price: self.min_price,
            max_price: self.max_price,
            min_year: self.min_year,
            max_year: self.max_year,
            fuel_type: self.fuel_type,
            transmission: self.transmission,
            vehicle_type: self.vehicle_type,
            status: self.status,
        };
        VehicleQuery::build(&filter, self.sort_by, self.sort_order, self.skip, self.limit)
    }
}

// Archivo rechazado dentro de un lote de subida
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FailedUpload {
    pub filename: String,
    pub error: String,
}

// Response de subida de imágenes
#[derive(Debug, Serialize, Deserialize)]
pub struct UploadImagesResponse {
    pub message: String,
    pub uploaded: usize,
    pub images: Vec<VehicleImage>,
    pub failed: Vec<FailedUpload>,
}

// Response genérica con un mensaje
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
