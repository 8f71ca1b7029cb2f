use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::contact::ContactMessage;
use crate::utils::errors::{AppError, AppResult};

#[async_trait]
pub trait ContactRepository: Send + Sync {
    async fn insert(&self, message: &ContactMessage) -> AppResult<()>;

    /// Mensajes del más reciente al más antiguo
    async fn list(&self, skip: i64, limit: i64) -> AppResult<Vec<ContactMessage>>;

    async fn count(&self) -> AppResult<i64>;
}

#[derive(Debug, sqlx::FromRow)]
struct ContactRow {
    id: Uuid,
    name: String,
    email: String,
    phone: Option<String>,
    message: String,
    vehicle_id: Option<String>,
    message_type: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<ContactRow> for ContactMessage {
    type Error = AppError;

    fn try_from(row: ContactRow) -> Result<Self, Self::Error> {
        Ok(ContactMessage {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            message: row.message,
            vehicle_id: row.vehicle_id,
            message_type: row.message_type.parse().map_err(AppError::Internal)?,
            created_at: row.created_at,
        })
    }
}

pub struct PgContactRepository {
    pool: PgPool,
}

impl PgContactRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContactRepository for PgContactRepository {
    async fn insert(&self, message: &ContactMessage) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO contact_messages (
                id, name, email, phone, message, vehicle_id, message_type, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(message.id)
        .bind(&message.name)
        .bind(&message.email)
        .bind(&message.phone)
        .bind(&message.message)
        .bind(&message.vehicle_id)
        .bind(message.message_type.as_str())
        .bind(message.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list(&self, skip: i64, limit: i64) -> AppResult<Vec<ContactMessage>> {
        let rows = sqlx::query_as::<_, ContactRow>(
            "SELECT * FROM contact_messages ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(skip)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ContactMessage::try_from).collect()
    }

    async fn count(&self) -> AppResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM contact_messages")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
