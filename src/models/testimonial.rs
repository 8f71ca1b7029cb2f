//! Modelo de Testimonial

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

fn default_rating() -> i32 {
    5
}

fn default_published() -> bool {
    true
}

/// Opinión de un cliente
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Testimonial {
    pub id: Uuid,
    pub name: String,
    pub content: String,
    pub rating: i32,
    pub published: bool,
    pub created_at: DateTime<Utc>,
}

/// Request para crear una opinión
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTestimonialRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(length(min = 1, max = 2000))]
    pub content: String,

    #[serde(default = "default_rating")]
    #[validate(range(min = 1, max = 5))]
    pub rating: i32,

    #[serde(default = "default_published")]
    pub published: bool,
}

impl Testimonial {
    pub fn new(request: CreateTestimonialRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: request.name,
            content: request.content,
            rating: request.rating,
            published: request.published,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_defaults_to_five_and_is_bounded() {
        let request: CreateTestimonialRequest = serde_json::from_value(serde_json::json!({
            "name": "Laura", "content": "Muy buen trato"
        }))
        .unwrap();
        assert_eq!(request.rating, 5);
        assert!(request.published);
        assert!(request.validate().is_ok());

        let invalid = CreateTestimonialRequest { rating: 6, ..request };
        assert!(invalid.validate().is_err());
    }
}
