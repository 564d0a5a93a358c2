use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};

use fleet_maintenance::{
    config::{DatabaseConfig, EnvironmentConfig},
    create_app,
    database::DatabaseConnection,
    middleware::cors_layer,
    repositories::PgMaintenanceRepository,
    utils::jwt::JwtConfig,
    AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::from_env()?;

    // Configurar logging
    let level = config
        .log_level
        .parse::<tracing::Level>()
        .unwrap_or(tracing::Level::INFO);
    tracing_subscriber::fmt().with_max_level(level).init();

    info!("🛠️  Fleet Maintenance API");
    info!("================================================");
    if config.is_development() {
        warn!("Modo desarrollo activo");
    }

    // Inicializar base de datos
    let db_config = DatabaseConfig::from_env()?;
    let db = DatabaseConnection::connect(&db_config).await?;
    if config.run_migrations {
        db.run_migrations().await?;
    }

    let repository = Arc::new(PgMaintenanceRepository::new(db.pool().clone()));
    let app_state = AppState::new(repository, JwtConfig::from(&config));
    let app = create_app(app_state, cors_layer(&config.cors_origins));

    let addr: SocketAddr = config
        .server_url()
        .parse()
        .with_context(|| format!("Dirección inválida: {}", config.server_url()))?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET   /health - Health check");
    info!("   POST  /maintenance - Programar mantenimiento (auth)");
    info!("   GET   /maintenance - Listar mantenimientos");
    info!("   GET   /maintenance/upcoming?days=N - Próximos mantenimientos");
    info!("   GET   /maintenance/vehicle/:id - Historial de un vehículo");
    info!("   GET   /maintenance/:id - Obtener mantenimiento");
    info!("   PATCH /maintenance/:id/status - Cambiar estado (auth)");
    info!("   PATCH /maintenance/:id/complete - Completar mantenimiento (auth)");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            e
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("No se pudo instalar el handler de SIGTERM: {}", e);
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
