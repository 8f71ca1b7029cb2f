use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};

use crate::controllers::auth_controller::AuthController;
use crate::dto::auth_dto::{InitAdminResponse, LoginRequest, TokenResponse};
use crate::middleware::AuthenticatedUser;
use crate::models::user::{CreateUserRequest, UserResponse};
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(me))
}

async fn register(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> AppResult<Json<UserResponse>> {
    let Json(request) = payload?;
    Ok(Json(AuthController::new(&state).register(request).await?))
}

async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<Json<TokenResponse>> {
    let Json(request) = payload?;
    Ok(Json(AuthController::new(&state).login(request).await?))
}

async fn me(AuthenticatedUser(user): AuthenticatedUser) -> Json<UserResponse> {
    Json(user.into())
}

pub async fn init_admin(State(state): State<AppState>) -> AppResult<Json<InitAdminResponse>> {
    Ok(Json(AuthController::new(&state).init_admin().await?))
}
