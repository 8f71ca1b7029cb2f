use axum::{
    extract::{
        multipart::MultipartRejection,
        rejection::{JsonRejection, QueryRejection},
        DefaultBodyLimit, Multipart, Path, Query, State,
    },
    routing::{delete, get, post},
    Json, Router,
};

use crate::controllers::vehicle_controller::{UploadedFile, VehicleController};
use crate::dto::vehicle_dto::{MessageResponse, UploadImagesResponse, VehicleListQuery};
use crate::middleware::AdminUser;
use crate::models::vehicle::{Vehicle, VehicleDetails};
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};

const FILES_FIELD: &str = "files";

pub fn create_vehicle_router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles).post(create_vehicle))
        .route(
            "/:id",
            get(get_vehicle).put(update_vehicle).delete(delete_vehicle),
        )
        .route(
            "/:id/images",
            post(upload_images).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route("/:id/images/:image_id", delete(delete_image))
}

async fn list_vehicles(
    State(state): State<AppState>,
    query: Result<Query<VehicleListQuery>, QueryRejection>,
) -> AppResult<Json<Vec<Vehicle>>> {
    let Query(query) = query?;
    let vehicles = VehicleController::new(&state).list(query).await?;
    Ok(Json(vehicles))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Path(id_or_slug): Path<String>,
) -> AppResult<Json<Vehicle>> {
    let vehicle = VehicleController::new(&state).get(&id_or_slug).await?;
    Ok(Json(vehicle))
}

async fn create_vehicle(
    State(state): State<AppState>,
    _admin: AdminUser,
    payload: Result<Json<VehicleDetails>, JsonRejection>,
) -> AppResult<Json<Vehicle>> {
    let Json(details) = payload?;
    let vehicle = VehicleController::new(&state).create(details).await?;
    Ok(Json(vehicle))
}

async fn update_vehicle(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
    payload: Result<Json<VehicleDetails>, JsonRejection>,
) -> AppResult<Json<Vehicle>> {
    let Json(details) = payload?;
    let vehicle = VehicleController::new(&state).update(&id, details).await?;
    Ok(Json(vehicle))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let response = VehicleController::new(&state).delete(&id).await?;
    Ok(Json(response))
}

async fn upload_images(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<UploadImagesResponse>> {
    let mut multipart =
        multipart.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    let mut files = Vec::new();
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILES_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or("sin_nombre").to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await?;
        files.push(UploadedFile {
            filename,
            content_type,
            bytes,
        });
    }

    let response = VehicleController::new(&state)
        .attach_images(&id, files)
        .await?;
    Ok(Json(response))
}

async fn delete_image(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path((id, image_id)): Path<(String, String)>,
) -> AppResult<Json<MessageResponse>> {
    let response = VehicleController::new(&state)
        .detach_image(&id, &image_id)
        .await?;
    Ok(Json(response))
}
