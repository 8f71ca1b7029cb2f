//! API del concesionario Ridauto Motor
//!
//! Catálogo de vehículos con imágenes procesadas, noticias, opiniones,
//! mensajes de contacto y autenticación JWT para el panel de administración.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

#[cfg(test)]
pub mod test_helpers;

use axum::{routing::get, Router};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::middleware::cors_layer;
use crate::services::asset_store::PUBLIC_PREFIX;
use crate::state::AppState;

/// Router completo: API bajo `/api`, imágenes estáticas bajo `/uploads`
pub fn create_app(state: AppState) -> Router {
    let config = state.config.clone();

    Router::new()
        .route("/api/", get(routes::service_info))
        .nest("/api", routes::create_api_router(config.max_upload_bytes))
        .nest_service(PUBLIC_PREFIX, ServeDir::new(state.assets.root()))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config))
        .with_state(state)
}
