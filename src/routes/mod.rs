//! Rutas de la API
//!
//! Todas cuelgan de `/api`; `lib::create_app` monta el router resultante.

pub mod auth_routes;
pub mod content_routes;
pub mod vehicle_routes;

use axum::{
    routing::{get, post},
    Json, Router,
};

use crate::dto::content_dto::ServiceInfo;
use crate::state::AppState;

pub fn create_api_router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/", get(service_info))
        .route("/init-admin", post(auth_routes::init_admin))
        .nest("/auth", auth_routes::create_auth_router())
        .nest("/vehicles", vehicle_routes::create_vehicle_router(max_upload_bytes))
        .nest("/news", content_routes::create_news_router())
        .nest("/testimonials", content_routes::create_testimonial_router())
        .nest("/contact", content_routes::create_contact_router())
        .nest("/stats", content_routes::create_stats_router())
}

pub async fn service_info() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: "Ridauto Motor API",
        version: env!("CARGO_PKG_VERSION"),
        status: "running",
    })
}
