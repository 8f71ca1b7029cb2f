//! Controlador de autenticación
//!
//! Registro, login con bcrypt + JWT y creación de la cuenta de
//! administración inicial.

use std::sync::Arc;

use tracing::{info, warn};
use validator::Validate;

use crate::config::EnvironmentConfig;
use crate::dto::auth_dto::{InitAdminResponse, LoginRequest, TokenResponse};
use crate::models::user::{CreateUserRequest, User, UserResponse};
use crate::repositories::UserRepository;
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};
use crate::utils::jwt::{generate_token, JwtConfig};

pub struct AuthController {
    users: Arc<dyn UserRepository>,
    config: Arc<EnvironmentConfig>,
    jwt: JwtConfig,
}

impl AuthController {
    pub fn new(state: &AppState) -> Self {
        Self {
            users: state.users.clone(),
            config: state.config.clone(),
            jwt: state.jwt.clone(),
        }
    }

    fn hash_password(&self, password: &str) -> AppResult<String> {
        bcrypt::hash(password, self.config.bcrypt_cost)
            .map_err(|e| AppError::Hash(format!("Error generando hash: {}", e)))
    }

    /// Registrar un usuario normal (nunca administrador)
    pub async fn register(&self, request: CreateUserRequest) -> AppResult<UserResponse> {
        request.validate()?;

        if self.users.exists(&request.username, &request.email).await? {
            return Err(AppError::BadRequest("El usuario ya existe".to_string()));
        }

        let password_hash = self.hash_password(&request.password)?;
        let user = User::new(request.username, request.email, password_hash, false);
        self.users.insert(&user).await?;

        info!("👤 Usuario registrado: {}", user.username);
        Ok(user.into())
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<TokenResponse> {
        request.validate()?;

        let user = self.users.find_by_username(&request.username).await?;
        let valid = match &user {
            Some(user) => bcrypt::verify(&request.password, &user.password_hash)
                .map_err(|e| AppError::Hash(format!("Error verificando hash: {}", e)))?,
            None => false,
        };

        if !valid {
            warn!("🔒 Login fallido para {}", request.username);
            return Err(AppError::Unauthorized("Credenciales inválidas".to_string()));
        }

        let token = generate_token(&request.username, &self.jwt)?;
        info!("🔓 Login correcto: {}", request.username);
        Ok(TokenResponse::bearer(token))
    }

    /// Crear la cuenta de administración si todavía no existe
    pub async fn init_admin(&self) -> AppResult<InitAdminResponse> {
        let username = self.config.admin_username.clone();

        if self.users.find_by_username(&username).await?.is_some() {
            return Ok(InitAdminResponse {
                message: "El administrador ya existe".to_string(),
                username,
            });
        }

        let password = self
            .config
            .admin_password
            .as_deref()
            .ok_or_else(|| AppError::Internal("ADMIN_PASSWORD no está configurado".to_string()))?;

        let password_hash = self.hash_password(password)?;
        let admin = User::new(username.clone(), self.config.admin_email.clone(), password_hash, true);
        self.users.insert(&admin).await?;

        info!("🛡️ Administrador inicial creado: {}", username);
        Ok(InitAdminResponse {
            message: "Administrador creado".to_string(),
            username,
        })
    }
}
