use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    routing::get,
    Json, Router,
};

use crate::controllers::content_controller::ContentController;
use crate::dto::content_dto::{ContactListQuery, NewsListQuery, StatsResponse};
use crate::middleware::AdminUser;
use crate::models::contact::{ContactMessage, CreateContactRequest};
use crate::models::news::{CreateNewsRequest, NewsArticle};
use crate::models::testimonial::{CreateTestimonialRequest, Testimonial};
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub fn create_news_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_news).post(create_news))
        .route("/:id", get(get_news))
}

pub fn create_testimonial_router() -> Router<AppState> {
    Router::new().route("/", get(list_testimonials).post(create_testimonial))
}

pub fn create_contact_router() -> Router<AppState> {
    Router::new().route("/", get(list_contacts).post(create_contact))
}

pub fn create_stats_router() -> Router<AppState> {
    Router::new().route("/", get(get_stats))
}

async fn list_news(
    State(state): State<AppState>,
    query: Result<Query<NewsListQuery>, QueryRejection>,
) -> AppResult<Json<Vec<NewsArticle>>> {
    let Query(query) = query?;
    Ok(Json(ContentController::new(&state).list_news(query).await?))
}

async fn get_news(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<NewsArticle>> {
    Ok(Json(ContentController::new(&state).get_news(&id).await?))
}

async fn create_news(
    State(state): State<AppState>,
    _admin: AdminUser,
    payload: Result<Json<CreateNewsRequest>, JsonRejection>,
) -> AppResult<Json<NewsArticle>> {
    let Json(request) = payload?;
    Ok(Json(ContentController::new(&state).create_news(request).await?))
}

async fn list_testimonials(State(state): State<AppState>) -> AppResult<Json<Vec<Testimonial>>> {
    Ok(Json(ContentController::new(&state).list_testimonials().await?))
}

async fn create_testimonial(
    State(state): State<AppState>,
    _admin: AdminUser,
    payload: Result<Json<CreateTestimonialRequest>, JsonRejection>,
) -> AppResult<Json<Testimonial>> {
    let Json(request) = payload?;
    Ok(Json(ContentController::new(&state).create_testimonial(request).await?))
}

async fn create_contact(
    State(state): State<AppState>,
    payload: Result<Json<CreateContactRequest>, JsonRejection>,
) -> AppResult<Json<ContactMessage>> {
    let Json(request) = payload?;
    Ok(Json(ContentController::new(&state).create_contact(request).await?))
}

async fn list_contacts(
    State(state): State<AppState>,
    _admin: AdminUser,
    query: Result<Query<ContactListQuery>, QueryRejection>,
) -> AppResult<Json<Vec<ContactMessage>>> {
    let Query(query) = query?;
    Ok(Json(ContentController::new(&state).list_contacts(query).await?))
}

async fn get_stats(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> AppResult<Json<StatsResponse>> {
    Ok(Json(ContentController::new(&state).stats().await?))
}
