//! Utilidades compartidas por los tests de integración

#![allow(dead_code)]

use std::io::Cursor;
use std::path::Path;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use dealership_api::config::EnvironmentConfig;
use dealership_api::create_app;
use dealership_api::models::user::User;
use dealership_api::state::AppState;
use dealership_api::utils::jwt::generate_token;

pub const BOUNDARY: &str = "----ridautoBoundary7MA4YWxkTrZu0gW";

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub upload_dir: TempDir,
}

pub fn config(upload_dir: &Path) -> EnvironmentConfig {
    EnvironmentConfig {
        environment: "test".to_string(),
        port: 0,
        host: "127.0.0.1".to_string(),
        database_url: "memory".to_string(),
        database_max_connections: 1,
        jwt_secret: "integration-secret".to_string(),
        jwt_expiration: 3600,
        bcrypt_cost: 4,
        cors_origins: vec!["*".to_string()],
        upload_dir: upload_dir.to_path_buf(),
        max_upload_bytes: 10 * 1024 * 1024,
        admin_username: "admin".to_string(),
        admin_email: "admin@ridautomotor.com".to_string(),
        admin_password: Some("admin123".to_string()),
    }
}

impl TestApp {
    /// App vacía: sin usuarios
    pub fn empty() -> Self {
        let upload_dir = tempfile::tempdir().unwrap();
        let state = AppState::in_memory(config(upload_dir.path()));
        let router = create_app(state.clone());
        Self {
            router,
            state,
            upload_dir,
        }
    }

    /// App con un administrador (`admin`) y un cliente (`cliente`)
    pub async fn new() -> Self {
        let app = Self::empty();
        app.add_user("admin", "admin@ridautomotor.com", true).await;
        app.add_user("cliente", "cliente@example.com", false).await;
        app
    }

    pub async fn add_user(&self, username: &str, email: &str, is_admin: bool) {
        let hash = bcrypt::hash("password123", 4).unwrap();
        let user = User::new(username.to_string(), email.to_string(), hash, is_admin);
        self.state.users.insert(&user).await.unwrap();
    }

    pub fn token_for(&self, username: &str) -> String {
        generate_token(username, &self.state.jwt).unwrap()
    }

    pub fn admin_token(&self) -> String {
        self.token_for("admin")
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(request(Method::GET, uri, token).body(Body::empty()).unwrap())
            .await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(request(Method::DELETE, uri, token).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post_json(&self, uri: &str, token: Option<&str>, body: &Value) -> (StatusCode, Value) {
        self.send_json(Method::POST, uri, token, body).await
    }

    pub async fn put_json(&self, uri: &str, token: Option<&str>, body: &Value) -> (StatusCode, Value) {
        self.send_json(Method::PUT, uri, token, body).await
    }

    async fn send_json(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: &Value,
    ) -> (StatusCode, Value) {
        let request = request(method, uri, token)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(body).unwrap()))
            .unwrap();
        self.send(request).await
    }

    /// Subir archivos en el campo `files`: (nombre, content-type, bytes)
    pub async fn upload(
        &self,
        vehicle_id: &str,
        token: Option<&str>,
        files: &[(&str, &str, Vec<u8>)],
    ) -> (StatusCode, Value) {
        let request = request(Method::POST, &format!("/api/vehicles/{}/images", vehicle_id), token)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(multipart_body(files)))
            .unwrap();
        self.send(request).await
    }

    /// Crear un vehículo como admin y devolver su JSON
    pub async fn create_vehicle(&self, payload: &Value) -> Value {
        let token = self.admin_token();
        let (status, body) = self.post_json("/api/vehicles", Some(&token), payload).await;
        assert_eq!(status, StatusCode::OK, "{}", body);
        body
    }

    pub fn upload_path(&self, public_url: &str) -> std::path::PathBuf {
        let filename = public_url.trim_start_matches("/uploads/");
        self.upload_dir.path().join(filename)
    }

    pub fn stored_files(&self) -> usize {
        std::fs::read_dir(self.upload_dir.path()).unwrap().count()
    }
}

fn request(method: Method, uri: &str, token: Option<&str>) -> axum::http::request::Builder {
    let builder = Request::builder().method(method).uri(uri);
    match token {
        Some(token) => builder.header(header::AUTHORIZATION, format!("Bearer {}", token)),
        None => builder,
    }
}

pub fn multipart_body(files: &[(&str, &str, Vec<u8>)]) -> Vec<u8> {
    let mut body = Vec::new();
    for (filename, content_type, bytes) in files {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"files\"; filename=\"{}\"\r\n",
                filename
            )
            .as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let image = RgbImage::from_fn(width, height, |x, y| Rgb([(x % 256) as u8, (y % 256) as u8, 90]));
    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(image)
        .write_to(&mut buffer, ImageFormat::Png)
        .unwrap();
    buffer.into_inner()
}

pub fn vehicle_payload(brand: &str, model: &str, year: i32, price: f64, status: &str) -> Value {
    json!({
        "brand": brand,
        "model": model,
        "year": year,
        "price": price,
        "kilometers": 0,
        "fuel_type": "diesel",
        "transmission": "automatic",
        "color": "black",
        "power_hp": 286,
        "doors": 5,
        "seats": 5,
        "trunk_volume": 650,
        "warranty_months": 24,
        "vehicle_type": "new",
        "status": status,
        "description": "SUV premium",
        "features": ["GPS", "Cuero"]
    })
}
