//! Autenticación JWT
//!
//! Extractores de Axum para rutas protegidas. `AuthenticatedUser` exige un
//! token válido de un usuario existente (401 si no); `AdminUser` además
//! exige `is_admin` (403 si no).

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use tracing::debug;

use crate::{
    models::user::User,
    state::AppState,
    utils::{
        errors::AppError,
        jwt::{extract_token_from_header, verify_token},
    },
};

/// Usuario autenticado resuelto a partir del token
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

/// Usuario autenticado con permisos de administración
#[derive(Debug, Clone)]
pub struct AdminUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("Token de autorización requerido".to_string()))?;

        let token = extract_token_from_header(auth_header)?;
        let claims = verify_token(token, &state.jwt)?;

        let user = state
            .users
            .find_by_username(&claims.sub)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Usuario no encontrado".to_string()))?;

        debug!("🔑 Usuario autenticado: {}", user.username);
        Ok(AuthenticatedUser(user))
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let AuthenticatedUser(user) = AuthenticatedUser::from_request_parts(parts, state).await?;

        if !user.is_admin {
            return Err(AppError::Forbidden(
                "Se requieren permisos de administrador".to_string(),
            ));
        }

        Ok(AdminUser(user))
    }
}
