//! Controlador de vehículos
//!
//! CRUD del catálogo y gestión de imágenes. Las imágenes se procesan en el
//! pool bloqueante y se guardan una a una; un archivo que falla no detiene
//! el resto del lote.

use std::sync::Arc;

use axum::body::Bytes;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::dto::vehicle_dto::{FailedUpload, MessageResponse, UploadImagesResponse, VehicleListQuery};
use crate::models::vehicle::{Vehicle, VehicleDetails, VehicleImage};
use crate::repositories::{VehicleChange, VehicleRepository};
use crate::services::asset_store::AssetStore;
use crate::services::image_processor::ImageProcessor;
use crate::state::AppState;
use crate::utils::errors::{bad_request_error, not_found_error, AppError, AppResult};

/// Archivo recibido en el multipart de subida
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl UploadedFile {
    pub fn is_image(&self) -> bool {
        self.content_type
            .as_deref()
            .map_or(false, |content_type| content_type.starts_with("image/"))
    }
}

/// Solo la primera imagen guardada con éxito en un vehículo que no tenía
/// ninguna antes del lote es la principal.
pub fn is_primary_upload(existing_images: usize, stored_in_batch: usize) -> bool {
    existing_images == 0 && stored_in_batch == 0
}

/// Un id que no es UUID no puede existir: se trata como no encontrado
fn parse_id(resource: &str, id: &str) -> AppResult<Uuid> {
    Uuid::parse_str(id).map_err(|_| not_found_error(resource, id))
}

pub struct VehicleController {
    repository: Arc<dyn VehicleRepository>,
    assets: AssetStore,
    processor: ImageProcessor,
}

impl VehicleController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repository: state.vehicles.clone(),
            assets: state.assets.clone(),
            processor: state.images,
        }
    }

    pub async fn list(&self, query: VehicleListQuery) -> AppResult<Vec<Vehicle>> {
        query.validate()?;
        self.repository.search(&query.into_query()).await
    }

    pub async fn get(&self, id_or_slug: &str) -> AppResult<Vehicle> {
        self.repository
            .find_by_id_or_slug(id_or_slug)
            .await?
            .ok_or_else(|| not_found_error("Vehículo", id_or_slug))
    }

    pub async fn create(&self, details: VehicleDetails) -> AppResult<Vehicle> {
        details.validate()?;

        let vehicle = Vehicle::new(details);
        self.repository.insert(&vehicle).await?;

        info!("🚗 Vehículo creado: {} ({})", vehicle.slug, vehicle.id);
        Ok(vehicle)
    }

    pub async fn update(&self, id: &str, details: VehicleDetails) -> AppResult<Vehicle> {
        let vehicle_id = parse_id("Vehículo", id)?;
        details.validate()?;

        let vehicle = self
            .repository
            .update(vehicle_id, VehicleChange::details(details))
            .await?
            .ok_or_else(|| not_found_error("Vehículo", id))?;

        info!("✏️ Vehículo actualizado: {} ({})", vehicle.slug, vehicle.id);
        Ok(vehicle)
    }

    pub async fn delete(&self, id: &str) -> AppResult<MessageResponse> {
        let vehicle_id = parse_id("Vehículo", id)?;

        let vehicle = self
            .repository
            .delete(vehicle_id)
            .await?
            .ok_or_else(|| not_found_error("Vehículo", id))?;

        for image in &vehicle.images {
            self.assets.remove(&image.filename).await;
        }

        info!("🗑️ Vehículo eliminado: {} ({} imágenes)", vehicle.id, vehicle.images.len());
        Ok(MessageResponse::new("Vehículo eliminado"))
    }

    /// Procesar, guardar y añadir un lote de imágenes
    pub async fn attach_images(
        &self,
        id: &str,
        files: Vec<UploadedFile>,
    ) -> AppResult<UploadImagesResponse> {
        let vehicle_id = parse_id("Vehículo", id)?;
        let vehicle = self
            .repository
            .find_by_id(vehicle_id)
            .await?
            .ok_or_else(|| not_found_error("Vehículo", id))?;

        if files.is_empty() {
            return Err(bad_request_error("Se requiere al menos un archivo en el campo 'files'"));
        }
        if let Some(file) = files.iter().find(|file| !file.is_image()) {
            return Err(AppError::BadRequest(format!(
                "El archivo '{}' debe ser una imagen",
                file.filename
            )));
        }

        let existing_images = vehicle.images.len();
        let mut uploaded: Vec<VehicleImage> = Vec::new();
        let mut failed: Vec<FailedUpload> = Vec::new();
        let mut first_error: Option<AppError> = None;

        for file in files {
            match self.store_file(&file).await {
                Ok((asset_id, filename, url, thumbnail_url)) => uploaded.push(VehicleImage {
                    id: asset_id,
                    filename,
                    url,
                    thumbnail_url,
                    is_primary: is_primary_upload(existing_images, uploaded.len()),
                }),
                Err(error) => {
                    warn!("⚠️ Imagen descartada '{}': {}", file.filename, error);
                    failed.push(FailedUpload {
                        filename: file.filename,
                        error: error.to_string(),
                    });
                    first_error.get_or_insert(error);
                }
            }
        }

        // Sin ninguna imagen guardada se devuelve el primer fallo tal cual:
        // un archivo ilegible es 400, un fallo de disco sigue siendo 500
        if uploaded.is_empty() {
            return Err(first_error.unwrap_or_else(|| {
                AppError::ImageProcessing("Ninguna imagen procesada".to_string())
            }));
        }

        let mut images = vehicle.images;
        images.extend(uploaded.iter().cloned());

        self.repository
            .update(vehicle_id, VehicleChange::images(images))
            .await?
            .ok_or_else(|| not_found_error("Vehículo", id))?;

        info!(
            "🖼️ {} imágenes añadidas al vehículo {} ({} fallidas)",
            uploaded.len(),
            vehicle_id,
            failed.len()
        );

        Ok(UploadImagesResponse {
            message: format!("{} imágenes subidas", uploaded.len()),
            uploaded: uploaded.len(),
            images: uploaded,
            failed,
        })
    }

    async fn store_file(&self, file: &UploadedFile) -> AppResult<(Uuid, String, String, String)> {
        let processor = self.processor;
        let bytes = file.bytes.clone();
        let processed = tokio::task::spawn_blocking(move || processor.process(&bytes))
            .await
            .map_err(|e| AppError::Internal(format!("Tarea de imagen interrumpida: {}", e)))??;

        let asset = self.assets.store(&processed.main, &processed.thumbnail).await?;
        Ok((asset.id, asset.main_filename, asset.main_url, asset.thumbnail_url))
    }

    /// Quitar una imagen del vehículo y borrar sus archivos
    pub async fn detach_image(&self, id: &str, image_id: &str) -> AppResult<MessageResponse> {
        let vehicle_id = parse_id("Vehículo", id)?;
        let vehicle = self
            .repository
            .find_by_id(vehicle_id)
            .await?
            .ok_or_else(|| not_found_error("Vehículo", id))?;

        let image_uuid = parse_id("Imagen", image_id)?;
        let image = vehicle
            .find_image(image_uuid)
            .cloned()
            .ok_or_else(|| not_found_error("Imagen", image_id))?;

        self.assets.remove(&image.filename).await;

        let images: Vec<VehicleImage> = vehicle
            .images
            .into_iter()
            .filter(|existing| existing.id != image_uuid)
            .collect();

        self.repository
            .update(vehicle_id, VehicleChange::images(images))
            .await?
            .ok_or_else(|| not_found_error("Vehículo", id))?;

        info!("🗑️ Imagen {} eliminada del vehículo {}", image_uuid, vehicle_id);
        Ok(MessageResponse::new("Imagen eliminada"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryStore;
    use crate::test_helpers::{png_bytes, sample_details};

    #[test]
    fn test_primary_only_for_first_stored_on_empty_vehicle() {
        assert!(is_primary_upload(0, 0));
        assert!(!is_primary_upload(0, 1));
        assert!(!is_primary_upload(0, 2));
        assert!(!is_primary_upload(3, 0));
    }

    #[test]
    fn test_content_type_must_be_image() {
        let file = |content_type: Option<&str>| UploadedFile {
            filename: "x".to_string(),
            content_type: content_type.map(str::to_string),
            bytes: Bytes::new(),
        };
        assert!(file(Some("image/png")).is_image());
        assert!(file(Some("image/jpeg")).is_image());
        assert!(!file(Some("text/plain")).is_image());
        assert!(!file(None).is_image());
    }

    fn controller_with_uploads_at(root: &std::path::Path) -> (VehicleController, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let controller = VehicleController {
            repository: store.clone(),
            assets: AssetStore::new(root),
            processor: ImageProcessor::default(),
        };
        (controller, store)
    }

    fn png_upload(name: &str) -> UploadedFile {
        UploadedFile {
            filename: name.to_string(),
            content_type: Some("image/png".to_string()),
            bytes: Bytes::from(png_bytes(64, 48)),
        }
    }

    #[tokio::test]
    async fn test_all_files_failing_on_disk_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        // El directorio de subidas no existe: toda escritura falla
        let (controller, store) = controller_with_uploads_at(&dir.path().join("no-existe"));
        let vehicle = Vehicle::new(sample_details());
        VehicleRepository::insert(store.as_ref(), &vehicle).await.unwrap();

        let error = controller
            .attach_images(&vehicle.id.to_string(), vec![png_upload("a.png"), png_upload("b.png")])
            .await
            .unwrap_err();

        assert!(matches!(error, AppError::Storage(_)));
        let stored = store.find_by_id(vehicle.id).await.unwrap().unwrap();
        assert!(stored.images.is_empty());
    }

    #[tokio::test]
    async fn test_all_files_unreadable_is_a_processing_error() {
        let dir = tempfile::tempdir().unwrap();
        let (controller, store) = controller_with_uploads_at(dir.path());
        let vehicle = Vehicle::new(sample_details());
        VehicleRepository::insert(store.as_ref(), &vehicle).await.unwrap();

        let corrupt = UploadedFile {
            bytes: Bytes::from_static(b"no es una imagen"),
            ..png_upload("roto.png")
        };
        let error = controller
            .attach_images(&vehicle.id.to_string(), vec![corrupt])
            .await
            .unwrap_err();

        assert!(matches!(error, AppError::ImageProcessing(_)));
    }

    #[test]
    fn test_invalid_uuid_is_not_found() {
        let error = parse_id("Vehículo", "no-es-uuid").unwrap_err();
        assert!(matches!(error, AppError::NotFound(_)));
    }
}
