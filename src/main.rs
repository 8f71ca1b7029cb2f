use anyhow::Result;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use dealership_api::config::EnvironmentConfig;
use dealership_api::create_app;
use dealership_api::database::DatabaseConnection;
use dealership_api::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenvy::dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")),
        )
        .init();

    info!("🚗 Ridauto Motor API");
    info!("================================================");

    let config = match EnvironmentConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("❌ Configuración inválida: {:#}", e);
            return Err(e);
        }
    };
    info!("⚙️ Entorno: {}", config.environment);

    // Inicializar base de datos
    let connection = match DatabaseConnection::connect(&config).await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {:#}", e);
            return Err(e);
        }
    };

    let addr = config.server_url();
    let state = AppState::from_connection(connection, config);
    state.assets.ensure_root().await?;

    let app = create_app(state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /api/ - Estado del servicio");
    info!("   POST /api/auth/register | /api/auth/login, GET /api/auth/me");
    info!("   POST /api/init-admin - Crear administrador inicial");
    info!("   GET  /api/vehicles | /api/vehicles/:id_or_slug");
    info!("   POST/PUT/DELETE /api/vehicles[/:id] - Admin");
    info!("   POST /api/vehicles/:id/images, DELETE /api/vehicles/:id/images/:image_id - Admin");
    info!("   GET  /api/news | /api/testimonials, POST /api/contact");
    info!("   GET  /api/stats - Admin");
    info!("   GET  /uploads/:filename - Imágenes");

    let listener = tokio::net::TcpListener::bind(addr.as_str()).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Error del servidor: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo escuchar Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo escuchar SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
