use serde::{Deserialize, Serialize};
use validator::Validate;

fn default_news_limit() -> i64 {
    10
}

fn default_contact_limit() -> i64 {
    50
}

// Paginación del listado de noticias
#[derive(Debug, Deserialize, Validate)]
pub struct NewsListQuery {
    #[serde(default)]
    #[validate(range(min = 0))]
    pub skip: i64,

    #[serde(default = "default_news_limit")]
    #[validate(range(min = 1, max = 100))]
    pub limit: i64,
}

// Paginación del listado de mensajes (admin)
#[derive(Debug, Deserialize, Validate)]
pub struct ContactListQuery {
    #[serde(default)]
    #[validate(range(min = 0))]
    pub skip: i64,

    #[serde(default = "default_contact_limit")]
    #[validate(range(min = 1, max = 500))]
    pub limit: i64,
}

// Contadores del panel de administración
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatsResponse {
    pub total_vehicles: i64,
    pub available_vehicles: i64,
    pub sold_vehicles: i64,
    pub total_messages: i64,
}

// Banner de GET /api/
#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub message: &'static str,
    pub version: &'static str,
    pub status: &'static str,
}
