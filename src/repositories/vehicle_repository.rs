use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::models::vehicle::{Vehicle, VehicleDetails, VehicleImage, VehicleStatus};
use crate::services::vehicle_query::VehicleQuery;
use crate::utils::errors::{AppError, AppResult};

/// Cambio tipado sobre un documento Vehicle.
///
/// `Details` reemplaza todos los datos descriptivos (y el slug derivado);
/// `Images` reemplaza solo la lista de imágenes. Ambos refrescan `updated_at`.
#[derive(Debug, Clone)]
pub enum VehicleChange {
    Details {
        details: VehicleDetails,
        slug: String,
        updated_at: DateTime<Utc>,
    },
    Images {
        images: Vec<VehicleImage>,
        updated_at: DateTime<Utc>,
    },
}

impl VehicleChange {
    pub fn details(details: VehicleDetails) -> Self {
        Self::Details {
            slug: details.slug(),
            details,
            updated_at: Utc::now(),
        }
    }

    pub fn images(images: Vec<VehicleImage>) -> Self {
        Self::Images {
            images,
            updated_at: Utc::now(),
        }
    }

    pub fn apply_to(self, vehicle: &mut Vehicle) {
        match self {
            VehicleChange::Details {
                details,
                slug,
                updated_at,
            } => {
                vehicle.details = details;
                vehicle.slug = slug;
                vehicle.updated_at = updated_at;
            }
            VehicleChange::Images { images, updated_at } => {
                vehicle.images = images;
                vehicle.updated_at = updated_at;
            }
        }
    }
}

#[async_trait]
pub trait VehicleRepository: Send + Sync {
    async fn insert(&self, vehicle: &Vehicle) -> AppResult<()>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Vehicle>>;

    /// Buscar por id o por slug; con slugs repetidos gana el más antiguo
    async fn find_by_id_or_slug(&self, key: &str) -> AppResult<Option<Vehicle>>;

    async fn search(&self, query: &VehicleQuery) -> AppResult<Vec<Vehicle>>;

    /// Aplicar un cambio y devolver el documento resultante (`None` si no existe)
    async fn update(&self, id: Uuid, change: VehicleChange) -> AppResult<Option<Vehicle>>;

    /// Borrar y devolver el documento eliminado
    async fn delete(&self, id: Uuid) -> AppResult<Option<Vehicle>>;

    async fn count(&self, status: Option<VehicleStatus>) -> AppResult<i64>;
}

// Fila de la tabla vehicles; los enums se guardan como TEXT
#[derive(Debug, sqlx::FromRow)]
struct VehicleRow {
    id: Uuid,
    slug: String,
    brand: String,
    model: String,
    year: i32,
    price: f64,
    kilometers: i32,
    fuel_type: String,
    transmission: String,
    color: String,
    power_hp: i32,
    doors: i32,
    seats: i32,
    trunk_volume: Option<i32>,
    warranty_months: i32,
    vehicle_type: String,
    status: String,
    description: String,
    features: Vec<String>,
    images: Json<Vec<VehicleImage>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<VehicleRow> for Vehicle {
    type Error = AppError;

    fn try_from(row: VehicleRow) -> Result<Self, Self::Error> {
        Ok(Vehicle {
            id: row.id,
            slug: row.slug,
            details: VehicleDetails {
                brand: row.brand,
                model: row.model,
                year: row.year,
                price: row.price,
                kilometers: row.kilometers,
                fuel_type: row.fuel_type,
                transmission: row.transmission,
                color: row.color,
                power_hp: row.power_hp,
                doors: row.doors,
                seats: row.seats,
                trunk_volume: row.trunk_volume,
                warranty_months: row.warranty_months,
                vehicle_type: row.vehicle_type.parse().map_err(AppError::Internal)?,
                status: row.status.parse().map_err(AppError::Internal)?,
                description: row.description,
                features: row.features,
            },
            images: row.images.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn into_vehicle(row: Option<VehicleRow>) -> AppResult<Option<Vehicle>> {
    row.map(Vehicle::try_from).transpose()
}

pub struct PgVehicleRepository {
    pool: PgPool,
}

impl PgVehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VehicleRepository for PgVehicleRepository {
    async fn insert(&self, vehicle: &Vehicle) -> AppResult<()> {
        let details = &vehicle.details;
        sqlx::query(
            r#"
            INSERT INTO vehicles (
                id, slug, brand, model, year, price, kilometers, fuel_type, transmission,
                color, power_hp, doors, seats, trunk_volume, warranty_months, vehicle_type,
                status, description, features, images, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16,
                    $17, $18, $19, $20, $21, $22)
            "#,
        )
        .bind(vehicle.id)
        .bind(&vehicle.slug)
        .bind(&details.brand)
        .bind(&details.model)
        .bind(details.year)
        .bind(details.price)
        .bind(details.kilometers)
        .bind(&details.fuel_type)
        .bind(&details.transmission)
        .bind(&details.color)
        .bind(details.power_hp)
        .bind(details.doors)
        .bind(details.seats)
        .bind(details.trunk_volume)
        .bind(details.warranty_months)
        .bind(details.vehicle_type.as_str())
        .bind(details.status.as_str())
        .bind(&details.description)
        .bind(&details.features)
        .bind(Json(&vehicle.images))
        .bind(vehicle.created_at)
        .bind(vehicle.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Vehicle>> {
        let row = sqlx::query_as::<_, VehicleRow>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        into_vehicle(row)
    }

    async fn find_by_id_or_slug(&self, key: &str) -> AppResult<Option<Vehicle>> {
        let row = match Uuid::parse_str(key) {
            Ok(id) => {
                sqlx::query_as::<_, VehicleRow>(
                    r#"
                    SELECT * FROM vehicles
                    WHERE id = $1 OR slug = $2
                    ORDER BY (id = $1) DESC, created_at ASC
                    LIMIT 1
                    "#,
                )
                .bind(id)
                .bind(key)
                .fetch_optional(&self.pool)
                .await?
            }
            Err(_) => {
                sqlx::query_as::<_, VehicleRow>(
                    "SELECT * FROM vehicles WHERE slug = $1 ORDER BY created_at ASC LIMIT 1",
                )
                .bind(key)
                .fetch_optional(&self.pool)
                .await?
            }
        };

        into_vehicle(row)
    }

    async fn search(&self, query: &VehicleQuery) -> AppResult<Vec<Vehicle>> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT * FROM vehicles");
        query.push_sql(&mut builder);

        let rows = builder
            .build_query_as::<VehicleRow>()
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Vehicle::try_from).collect()
    }

    async fn update(&self, id: Uuid, change: VehicleChange) -> AppResult<Option<Vehicle>> {
        let row = match change {
            VehicleChange::Details {
                details,
                slug,
                updated_at,
            } => {
                sqlx::query_as::<_, VehicleRow>(
                    r#"
                    UPDATE vehicles
                    SET slug = $2, brand = $3, model = $4, year = $5, price = $6,
                        kilometers = $7, fuel_type = $8, transmission = $9, color = $10,
                        power_hp = $11, doors = $12, seats = $13, trunk_volume = $14,
                        warranty_months = $15, vehicle_type = $16, status = $17,
                        description = $18, features = $19, updated_at = $20
                    WHERE id = $1
                    RETURNING *
                    "#,
                )
                .bind(id)
                .bind(slug)
                .bind(details.brand)
                .bind(details.model)
                .bind(details.year)
                .bind(details.price)
                .bind(details.kilometers)
                .bind(details.fuel_type)
                .bind(details.transmission)
                .bind(details.color)
                .bind(details.power_hp)
                .bind(details.doors)
                .bind(details.seats)
                .bind(details.trunk_volume)
                .bind(details.warranty_months)
                .bind(details.vehicle_type.as_str())
                .bind(details.status.as_str())
                .bind(details.description)
                .bind(details.features)
                .bind(updated_at)
                .fetch_optional(&self.pool)
                .await?
            }
            VehicleChange::Images { images, updated_at } => {
                sqlx::query_as::<_, VehicleRow>(
                    "UPDATE vehicles SET images = $2, updated_at = $3 WHERE id = $1 RETURNING *",
                )
                .bind(id)
                .bind(Json(images))
                .bind(updated_at)
                .fetch_optional(&self.pool)
                .await?
            }
        };

        into_vehicle(row)
    }

    async fn delete(&self, id: Uuid) -> AppResult<Option<Vehicle>> {
        let row = sqlx::query_as::<_, VehicleRow>("DELETE FROM vehicles WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        into_vehicle(row)
    }

    async fn count(&self, status: Option<VehicleStatus>) -> AppResult<i64> {
        let count = match status {
            Some(status) => {
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM vehicles WHERE status = $1")
                    .bind(status.as_str())
                    .fetch_one(&self.pool)
                    .await?
            }
            None => {
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM vehicles")
                    .fetch_one(&self.pool)
                    .await?
            }
        };

        Ok(count)
    }
}
