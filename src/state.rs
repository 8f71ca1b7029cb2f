//! Estado compartido de la aplicación
//!
//! Este módulo define el estado que se pasa a través del router de Axum:
//! repositorios detrás de traits, almacén de imágenes y configuración.

use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::database::{DatabaseConnection, MemoryStore};
use crate::repositories::{
    ContactRepository, NewsRepository, PgContactRepository, PgNewsRepository,
    PgTestimonialRepository, PgUserRepository, PgVehicleRepository, TestimonialRepository,
    UserRepository, VehicleRepository,
};
use crate::services::asset_store::AssetStore;
use crate::services::image_processor::ImageProcessor;
use crate::utils::jwt::JwtConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<EnvironmentConfig>,
    pub jwt: JwtConfig,
    pub vehicles: Arc<dyn VehicleRepository>,
    pub news: Arc<dyn NewsRepository>,
    pub testimonials: Arc<dyn TestimonialRepository>,
    pub contacts: Arc<dyn ContactRepository>,
    pub users: Arc<dyn UserRepository>,
    pub assets: AssetStore,
    pub images: ImageProcessor,
}

impl AppState {
    pub fn from_connection(connection: DatabaseConnection, config: EnvironmentConfig) -> Self {
        match connection {
            DatabaseConnection::Postgres(pool) => Self {
                jwt: JwtConfig::from(&config),
                assets: AssetStore::new(config.upload_dir.clone()),
                images: ImageProcessor::default(),
                vehicles: Arc::new(PgVehicleRepository::new(pool.clone())),
                news: Arc::new(PgNewsRepository::new(pool.clone())),
                testimonials: Arc::new(PgTestimonialRepository::new(pool.clone())),
                contacts: Arc::new(PgContactRepository::new(pool.clone())),
                users: Arc::new(PgUserRepository::new(pool)),
                config: Arc::new(config),
            },
            DatabaseConnection::Memory => Self::in_memory(config),
        }
    }

    /// Estado con todos los repositorios sobre un único `MemoryStore`
    pub fn in_memory(config: EnvironmentConfig) -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            jwt: JwtConfig::from(&config),
            assets: AssetStore::new(config.upload_dir.clone()),
            images: ImageProcessor::default(),
            vehicles: store.clone(),
            news: store.clone(),
            testimonials: store.clone(),
            contacts: store.clone(),
            users: store,
            config: Arc::new(config),
        }
    }
}
