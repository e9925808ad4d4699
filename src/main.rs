use std::sync::Arc;

use products_api::{
    app::{self, products::{AppState, PgProductStore}},
    infrastructure::{config::AppConfig, database::DatabaseManager, logger::Logger, schema},
};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    Logger::init(&config.log_level);

    let db = DatabaseManager::connect_lazy(&config.database)?;

    // 不等待建表完成，早到的请求可能会失败
    schema::spawn_bootstrap(db.clone());

    let state = AppState::new(Arc::new(PgProductStore::new(db)));
    let app = app::router(state);

    let listener = TcpListener::bind((config.host.as_str(), config.port)).await?;
    info!("Server is running http://localhost:{}", config.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to listen for Ctrl-C");
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
                tracing::error!(error = %err, "Failed to listen for SIGTERM");
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

    info!("Shutdown signal received");
}
