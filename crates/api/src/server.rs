//! Process bootstrap shared by both binaries.
//!
//! Order of operations: tracing, configuration, database connection (with
//! the service's retry policy), health probe, schema initialization, then
//! the HTTP listener. The listener is not bound until the schema exists.

use std::net::{AddrParseError, IpAddr, SocketAddr};
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{ConfigError, Service, ServerConfig};
use crate::router::build_app_router;
use crate::state::AppState;

/// Reasons a service can fail to start or stop serving.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database connection failed: {0}")]
    Connect(#[source] sqlx::Error),

    #[error("Database health check failed: {0}")]
    HealthCheck(#[source] sqlx::Error),

    #[error("Schema initialization failed: {0}")]
    Schema(#[source] sqlx::Error),

    #[error("Invalid HOST address: {0}")]
    Address(#[from] AddrParseError),

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "libris_api=debug,libris_db=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Run `service` until a shutdown signal arrives.
pub async fn run(service: Service) -> Result<(), StartupError> {
    dotenvy::dotenv().ok();

    // --- Configuration ---
    let config = ServerConfig::from_env(service)?;
    tracing::info!(
        service = service.name(),
        host = %config.host,
        port = config.port,
        connect_attempts = config.database.retry.attempts,
        "Loaded server configuration",
    );

    // --- Database ---
    let pool = libris_db::connect_with_retry(
        &config.database.connect_options,
        config.database.pool,
        config.database.retry,
    )
    .await
    .map_err(StartupError::Connect)?;
    tracing::info!("Database connection pool created");

    libris_db::health_check(&pool)
        .await
        .map_err(StartupError::HealthCheck)?;
    tracing::info!("Database health check passed");

    match service {
        Service::Catalog => libris_db::schema::init_catalog_schema(&pool).await,
        Service::Users => libris_db::schema::init_user_schema(&pool).await,
    }
    .map_err(StartupError::Schema)?;
    tracing::info!("Database schema initialized");

    // --- Router ---
    let addr = SocketAddr::new(config.host.parse::<IpAddr>()?, config.port);
    let state = AppState {
        pool: pool.clone(),
        config: Arc::new(config),
    };
    let app = build_app_router(state);

    // --- Start server ---
    tracing::info!(%addr, service = service.name(), "Starting server");
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped accepting connections, closing database pool");
    pool.close().await;
    tracing::info!("Graceful shutdown complete");

    Ok(())
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix). If a handler cannot
/// be installed, that branch never completes and the other still works.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
