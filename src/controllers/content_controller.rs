//! Controlador de contenidos públicos
//!
//! Noticias, opiniones de clientes, mensajes de contacto y contadores del
//! panel de administración.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::content_dto::{ContactListQuery, NewsListQuery, StatsResponse};
use crate::models::contact::{ContactMessage, CreateContactRequest};
use crate::models::news::{CreateNewsRequest, NewsArticle};
use crate::models::testimonial::{CreateTestimonialRequest, Testimonial};
use crate::models::vehicle::VehicleStatus;
use crate::repositories::{ContactRepository, NewsRepository, TestimonialRepository, VehicleRepository};
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppResult};

pub struct ContentController {
    news: Arc<dyn NewsRepository>,
    testimonials: Arc<dyn TestimonialRepository>,
    contacts: Arc<dyn ContactRepository>,
    vehicles: Arc<dyn VehicleRepository>,
}

impl ContentController {
    pub fn new(state: &AppState) -> Self {
        Self {
            news: state.news.clone(),
            testimonials: state.testimonials.clone(),
            contacts: state.contacts.clone(),
            vehicles: state.vehicles.clone(),
        }
    }

    pub async fn list_news(&self, query: NewsListQuery) -> AppResult<Vec<NewsArticle>> {
        query.validate()?;
        self.news.list_published(query.skip, query.limit).await
    }

    pub async fn get_news(&self, id: &str) -> AppResult<NewsArticle> {
        let article = match Uuid::parse_str(id) {
            Ok(uuid) => self.news.find_published(uuid).await?,
            Err(_) => None,
        };
        article.ok_or_else(|| not_found_error("Artículo", id))
    }

    pub async fn create_news(&self, request: CreateNewsRequest) -> AppResult<NewsArticle> {
        request.validate()?;
        let article = NewsArticle::new(request);
        self.news.insert(&article).await?;
        info!("📰 Noticia creada: {}", article.title);
        Ok(article)
    }

    pub async fn list_testimonials(&self) -> AppResult<Vec<Testimonial>> {
        self.testimonials.list_published().await
    }

    pub async fn create_testimonial(&self, request: CreateTestimonialRequest) -> AppResult<Testimonial> {
        request.validate()?;
        let testimonial = Testimonial::new(request);
        self.testimonials.insert(&testimonial).await?;
        info!("⭐ Opinión creada: {} ({})", testimonial.name, testimonial.rating);
        Ok(testimonial)
    }

    pub async fn create_contact(&self, request: CreateContactRequest) -> AppResult<ContactMessage> {
        request.validate()?;
        let message = ContactMessage::new(request);
        self.contacts.insert(&message).await?;
        info!("📨 Mensaje recibido ({}): {}", message.message_type.as_str(), message.email);
        Ok(message)
    }

    pub async fn list_contacts(&self, query: ContactListQuery) -> AppResult<Vec<ContactMessage>> {
        query.validate()?;
        self.contacts.list(query.skip, query.limit).await
    }

    pub async fn stats(&self) -> AppResult<StatsResponse> {
        Ok(StatsResponse {
            total_vehicles: self.vehicles.count(None).await?,
            available_vehicles: self.vehicles.count(Some(VehicleStatus::Available)).await?,
            sold_vehicles: self.vehicles.count(Some(VehicleStatus::Sold)).await?,
            total_messages: self.contacts.count().await?,
        })
    }
}
