//! Constructor de consultas de vehículos
//!
//! Traduce los filtros opcionales del listado público a un `VehicleQuery`
//! tipado. La misma consulta se renderiza a SQL parametrizado para
//! PostgreSQL o se evalúa sobre documentos en memoria.
//!
//! Regla de visibilidad: sin filtro de estado explícito se excluyen los
//! vehículos `hidden` (se muestran `available` y `sold`). Un estado
//! explícito, incluido `hidden`, reemplaza esa regla.
//!
//! No hay clave de ordenación secundaria: los empates salen en el orden
//! de almacenamiento.

use serde::Deserialize;
use sqlx::{Postgres, QueryBuilder};
use std::cmp::Ordering;

use crate::models::vehicle::{Vehicle, VehicleStatus, VehicleType};

pub const DEFAULT_LIMIT: i64 = 20;
pub const MAX_LIMIT: i64 = 100;

/// Campos por los que se permite ordenar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Price,
    Year,
    Kilometers,
    #[default]
    CreatedAt,
}

impl SortField {
    fn column(&self) -> &'static str {
        match self {
            SortField::Price => "price",
            SortField::Year => "year",
            SortField::Kilometers => "kilometers",
            SortField::CreatedAt => "created_at",
        }
    }

    fn compare(&self, a: &Vehicle, b: &Vehicle) -> Ordering {
        match self {
            SortField::Price => a
                .details
                .price
                .partial_cmp(&b.details.price)
                .unwrap_or(Ordering::Equal),
            SortField::Year => a.details.year.cmp(&b.details.year),
            SortField::Kilometers => a.details.kilometers.cmp(&b.details.kilometers),
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    fn keyword(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Filtros opcionales del listado
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VehicleFilter {
    pub brand: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_year: Option<i32>,
    pub max_year: Option<i32>,
    pub fuel_type: Option<String>,
    pub transmission: Option<String>,
    pub vehicle_type: Option<VehicleType>,
    pub status: Option<VehicleStatus>,
}

/// Condición individual de la consulta. Todas se combinan con AND.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    BrandContains(String),
    PriceAtLeast(f64),
    PriceAtMost(f64),
    YearAtLeast(i32),
    YearAtMost(i32),
    FuelType(String),
    Transmission(String),
    VehicleType(VehicleType),
    Status(VehicleStatus),
    StatusNot(VehicleStatus),
}

impl Condition {
    pub fn matches(&self, vehicle: &Vehicle) -> bool {
        let details = &vehicle.details;
        match self {
            Condition::BrandContains(needle) => details
                .brand
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            Condition::PriceAtLeast(min) => details.price >= *min,
            Condition::PriceAtMost(max) => details.price <= *max,
            Condition::YearAtLeast(min) => details.year >= *min,
            Condition::YearAtMost(max) => details.year <= *max,
            Condition::FuelType(fuel) => details.fuel_type == *fuel,
            Condition::Transmission(transmission) => details.transmission == *transmission,
            Condition::VehicleType(vehicle_type) => details.vehicle_type == *vehicle_type,
            Condition::Status(status) => details.status == *status,
            Condition::StatusNot(status) => details.status != *status,
        }
    }

    fn push_sql(&self, builder: &mut QueryBuilder<'_, Postgres>) {
        match self {
            Condition::BrandContains(needle) => {
                builder
                    .push("brand ILIKE ")
                    .push_bind(format!("%{}%", escape_like(needle)))
                    .push(" ESCAPE '\\'");
            }
            Condition::PriceAtLeast(min) => {
                builder.push("price >= ").push_bind(*min);
            }
            Condition::PriceAtMost(max) => {
                builder.push("price <= ").push_bind(*max);
            }
            Condition::YearAtLeast(min) => {
                builder.push("year >= ").push_bind(*min);
            }
            Condition::YearAtMost(max) => {
                builder.push("year <= ").push_bind(*max);
            }
            Condition::FuelType(fuel) => {
                builder.push("fuel_type = ").push_bind(fuel.clone());
            }
            Condition::Transmission(transmission) => {
                builder.push("transmission = ").push_bind(transmission.clone());
            }
            Condition::VehicleType(vehicle_type) => {
                builder.push("vehicle_type = ").push_bind(vehicle_type.as_str());
            }
            Condition::Status(status) => {
                builder.push("status = ").push_bind(status.as_str());
            }
            Condition::StatusNot(status) => {
                builder.push("status <> ").push_bind(status.as_str());
            }
        }
    }
}

/// Escapar los comodines de LIKE para que la marca se busque literal
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Consulta completa: condiciones, orden y paginación
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleQuery {
    pub conditions: Vec<Condition>,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
    pub skip: i64,
    pub limit: i64,
}

impl VehicleQuery {
    /// Construir la consulta a partir de los filtros.
    ///
    /// `skip` y `limit` ya vienen validados desde la capa HTTP; aquí solo se
    /// acotan para que la consulta nunca salga del rango permitido.
    pub fn build(
        filter: &VehicleFilter,
        sort_by: SortField,
        sort_order: SortOrder,
        skip: i64,
        limit: i64,
    ) -> Self {
        let mut conditions = Vec::new();

        if let Some(brand) = non_empty(&filter.brand) {
            conditions.push(Condition::BrandContains(brand));
        }
        if let Some(min) = filter.min_price {
            conditions.push(Condition::PriceAtLeast(min));
        }
        if let Some(max) = filter.max_price {
            conditions.push(Condition::PriceAtMost(max));
        }
        if let Some(min) = filter.min_year {
            conditions.push(Condition::YearAtLeast(min));
        }
        if let Some(max) = filter.max_year {
            conditions.push(Condition::YearAtMost(max));
        }
        if let Some(fuel) = non_empty(&filter.fuel_type) {
            conditions.push(Condition::FuelType(fuel));
        }
        if let Some(transmission) = non_empty(&filter.transmission) {
            conditions.push(Condition::Transmission(transmission));
        }
        if let Some(vehicle_type) = filter.vehicle_type {
            conditions.push(Condition::VehicleType(vehicle_type));
        }

        // Visibilidad por defecto
        match filter.status {
            Some(status) => conditions.push(Condition::Status(status)),
            None => conditions.push(Condition::StatusNot(VehicleStatus::Hidden)),
        }

        Self {
            conditions,
            sort_by,
            sort_order,
            skip: skip.max(0),
            limit: limit.clamp(1, MAX_LIMIT),
        }
    }

    pub fn matches(&self, vehicle: &Vehicle) -> bool {
        self.conditions.iter().all(|condition| condition.matches(vehicle))
    }

    /// Evaluar la consulta sobre documentos en memoria (orden de almacenamiento
    /// conservado en los empates gracias a la ordenación estable).
    pub fn apply<I>(&self, vehicles: I) -> Vec<Vehicle>
    where
        I: IntoIterator<Item = Vehicle>,
    {
        let mut matching: Vec<Vehicle> = vehicles
            .into_iter()
            .filter(|vehicle| self.matches(vehicle))
            .collect();

        matching.sort_by(|a, b| match self.sort_order {
            SortOrder::Asc => self.sort_by.compare(a, b),
            SortOrder::Desc => self.sort_by.compare(b, a),
        });

        matching
            .into_iter()
            .skip(self.skip as usize)
            .take(self.limit as usize)
            .collect()
    }

    /// Añadir `WHERE ... ORDER BY ... LIMIT ... OFFSET ...` a una consulta SQL
    pub fn push_sql(&self, builder: &mut QueryBuilder<'_, Postgres>) {
        for (i, condition) in self.conditions.iter().enumerate() {
            builder.push(if i == 0 { " WHERE " } else { " AND " });
            condition.push_sql(builder);
        }

        builder
            .push(" ORDER BY ")
            .push(self.sort_by.column())
            .push(" ")
            .push(self.sort_order.keyword());

        builder.push(" LIMIT ").push_bind(self.limit);
        builder.push(" OFFSET ").push_bind(self.skip);
    }
}
