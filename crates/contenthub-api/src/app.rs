//! Application builder: wires stores, storage, and services into an Axum app.

use std::sync::Arc;

use axum::Router;

use contenthub_core::config::AppConfig;
use contenthub_core::error::AppError;
use contenthub_core::traits::storage::MediaStorage;
use contenthub_database::Stores;
use contenthub_storage::LocalMediaStorage;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Runs the ContentHub server until Ctrl+C.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting ContentHub server...");

    create_data_directories(&config).await?;

    let stores = Stores::connect(&config.database).await?;
    tracing::info!(provider = stores.provider_name(), "Store backend ready");

    let storage: Arc<dyn MediaStorage> =
        Arc::new(LocalMediaStorage::new(&config.storage.media_root).await?);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(config, stores.clone(), storage);
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("ContentHub server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    stores.close().await;
    tracing::info!("ContentHub server stopped");
    Ok(())
}

async fn create_data_directories(config: &AppConfig) -> Result<(), AppError> {
    for dir in [&config.storage.data_root, &config.storage.media_root] {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| AppError::internal(format!("Failed to create dir '{dir}': {e}")))?;
    }
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
