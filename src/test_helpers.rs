//! Datos de prueba compartidos por los tests unitarios.

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;
use std::path::Path;

use crate::config::EnvironmentConfig;
use crate::models::vehicle::{Vehicle, VehicleDetails, VehicleStatus, VehicleType};

pub fn sample_details() -> VehicleDetails {
    VehicleDetails {
        brand: "BMW".to_string(),
        model: "X5".to_string(),
        year: 2023,
        price: 75000.0,
        kilometers: 0,
        fuel_type: "diesel".to_string(),
        transmission: "automatic".to_string(),
        color: "black".to_string(),
        power_hp: 286,
        doors: 5,
        seats: 5,
        trunk_volume: Some(650),
        warranty_months: 24,
        vehicle_type: VehicleType::New,
        status: VehicleStatus::Available,
        description: "SUV premium".to_string(),
        features: vec!["GPS".to_string(), "GPS".to_string()],
    }
}

pub fn vehicle_with(brand: &str, year: i32, price: f64, status: VehicleStatus) -> Vehicle {
    let mut details = sample_details();
    details.brand = brand.to_string();
    details.year = year;
    details.price = price;
    details.kilometers = (2024 - year) * 10_000;
    details.status = status;
    Vehicle::new(details)
}

/// PNG RGBA generado en memoria con las dimensiones pedidas
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let image = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, 128, if x % 2 == 0 { 255 } else { 0 }])
    });
    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(image)
        .write_to(&mut buffer, ImageFormat::Png)
        .expect("encode png");
    buffer.into_inner()
}

pub fn test_config(upload_dir: &Path) -> EnvironmentConfig {
    EnvironmentConfig {
        environment: "test".to_string(),
        port: 0,
        host: "127.0.0.1".to_string(),
        database_url: "memory".to_string(),
        database_max_connections: 1,
        jwt_secret: "test-secret".to_string(),
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
