//! Modelo de NewsArticle

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

fn default_published() -> bool {
    true
}

/// Artículo de noticias
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct NewsArticle {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub image_url: Option<String>,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request para crear un artículo
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateNewsRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[validate(length(min = 1))]
    pub content: String,

    #[validate(length(max = 500))]
    pub excerpt: String,

    #[validate(length(max = 500))]
    pub image_url: Option<String>,

    #[serde(default = "default_published")]
    pub published: bool,
}

impl NewsArticle {
    pub fn new(request: CreateNewsRequest) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: request.title,
            content: request.content,
            excerpt: request.excerpt,
            image_url: request.image_url,
            published: request.published,
            created_at: now,
            updated_at: now,
        }
    }
}
