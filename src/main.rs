use std::net::SocketAddr;

use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use taxi_fleet::config::environment::EnvironmentConfig;
use taxi_fleet::database::connection::DatabaseConnection;
use taxi_fleet::repositories::Repositories;
use taxi_fleet::routes::create_app;
use taxi_fleet::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::from_env()?;

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str())),
        )
        .init();

    info!("🚕 Taxi Fleet Backend");
    info!("================================================");
    info!("🌍 Entorno: {}", config.environment);

    // Inicializar base de datos
    let db_connection = match DatabaseConnection::connect(&config).await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(e);
        }
    };

    let repos = Repositories::postgres(db_connection.pool().clone());
    let addr: SocketAddr = config.server_url().parse()?;
    if config.is_production() && config.cors_origins.is_empty() {
        warn!("⚠️  CORS_ORIGINS vacío en producción: se aceptan todos los orígenes");
    }
    let bootstrap = config
        .bootstrap_operator_login
        .clone()
        .zip(config.bootstrap_operator_password.clone());

    let state = AppState::new(repos, config);

    if let Some((login, password)) = bootstrap {
        match state.services.users.ensure_bootstrap_operator(&login, &password).await? {
            Some(user) => info!("👤 Operador inicial creado: {}", user.login),
            None => info!("👤 Operador inicial ya existe: {}", login),
        }
    } else if state.services.users.list().await?.is_empty() {
        warn!("⚠️  No hay usuarios y BOOTSTRAP_OPERATOR_LOGIN no está configurado");
    }

    let app = create_app(state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("   POST /api/auth/login - Login");
    info!("👥 Usuarios:");
    info!("   POST /api/users - Crear usuario (operador)");
    info!("   GET  /api/users - Listar usuarios");
    info!("   GET  /api/users/me - Usuario actual");
    info!("   PUT  /api/users/:id/active - Activar/desactivar usuario");
    info!("🚗 Coches:");
    info!("   POST /api/cars - Registrar coche");
    info!("   GET  /api/cars?operational=true - Listar coches");
    info!("   PUT  /api/cars/:id - Actualizar coche");
    info!("   PUT  /api/cars/:id/repair - Entrada/salida de taller");
    info!("   PUT  /api/cars/:id/active - Activar/desactivar coche");
    info!("🧑‍✈️ Conductores:");
    info!("   POST /api/drivers - Registrar conductor");
    info!("   PUT  /api/drivers/:id/car - Asignar coche");
    info!("   DELETE /api/drivers/:id - Eliminar conductor");
    info!("🩺 Revisiones médicas / 🔧 Inspecciones:");
    info!("   POST /api/medical-checks - Registrar revisión");
    info!("   POST /api/inspections - Registrar inspección");
    info!("📋 Hojas de ruta y turnos:");
    info!("   POST /api/waybills - Abrir hoja de ruta");
    info!("   POST /api/waybills/:id/close - Cerrar hoja de ruta");
    info!("   POST /api/waybills/:id/cancel - Cancelar hoja de ruta");
    info!("   GET  /api/shifts/driver/:id/readiness - Estado para iniciar turno");
    info!("🧾 Pedidos:");
    info!("   POST /api/orders - Crear pedido");
    info!("   POST /api/orders/:id/assign - Asignar conductor");
    info!("   POST /api/orders/:id/complete - Completar pedido");

    let listener = tokio::net::TcpListener::bind(addr).await?;
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
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
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
