//! Conexión a la base de datos
//!
//! `DATABASE_URL=memory` arranca el almacén en memoria; cualquier otra URL
//! se trata como PostgreSQL y se migra al conectar.

use anyhow::{Context, Result};
use sqlx::PgPool;
use tracing::info;

use crate::config::{DatabaseConfig, EnvironmentConfig};

pub enum DatabaseConnection {
    Postgres(PgPool),
    Memory,
}

impl DatabaseConnection {
    /// Conectar según la configuración y aplicar las migraciones pendientes
    pub async fn connect(config: &EnvironmentConfig) -> Result<Self> {
        if config.uses_memory_database() {
            info!("🧠 Usando almacén en memoria (los datos no se persisten)");
            return Ok(DatabaseConnection::Memory);
        }

        let db_config = DatabaseConfig::from(config);
        info!("🔌 Conectando a PostgreSQL: {}", mask_database_url(&db_config.url));
        let pool = db_config
            .create_pool()
            .await
            .context("No se pudo conectar a PostgreSQL")?;

        run_migrations(&pool).await?;
        info!("✅ Base de datos lista");

        Ok(DatabaseConnection::Postgres(pool))
    }
}

/// Ejecutar migraciones de la base de datos
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("Error ejecutando migraciones")?;
    info!("📦 Migraciones aplicadas");
    Ok(())
}

/// Función helper para enmascarar la URL de la base de datos en logs
fn mask_database_url(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at_pos)) if at_pos > scheme_end => {
            format!("{}***:***@{}", &url[..scheme_end + 3], &url[at_pos + 1..])
        }
        _ => url.to_string(),
    }
}
