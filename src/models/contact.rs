//! Modelo de ContactMessage
//!
//! Leads de la web: contacto general, financiación y tasación.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Categoría del mensaje
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    #[default]
    Contact,
    Financing,
    Valuation,
}

impl MessageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::Contact => "contact",
            MessageType::Financing => "financing",
            MessageType::Valuation => "valuation",
        }
    }
}

impl FromStr for MessageType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "contact" => Ok(MessageType::Contact),
            "financing" => Ok(MessageType::Financing),
            "valuation" => Ok(MessageType::Valuation),
            other => Err(format!("Tipo de mensaje desconocido: {}", other)),
        }
    }
}

/// Mensaje recibido desde los formularios públicos
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactMessage {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    /// Referencia por valor, sin integridad referencial
    pub vehicle_id: Option<String>,
    pub message_type: MessageType,
    pub created_at: DateTime<Utc>,
}

/// Request para crear un mensaje
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateContactRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(max = 30))]
    pub phone: Option<String>,

    #[validate(length(min = 1, max = 5000))]
    pub message: String,

    pub vehicle_id: Option<String>,

    #[serde(default)]
    pub message_type: MessageType,
}

impl ContactMessage {
    pub fn new(request: CreateContactRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: request.name,
            email: request.email,
            phone: request.phone,
            message: request.message,
            vehicle_id: request.vehicle_id,
            message_type: request.message_type,
            created_at: Utc::now(),
        }
    }
}
