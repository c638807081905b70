//! Account service binary: loads configuration, prepares the store, serves the API.

use account_service::{
    app, ensure_accounts_table, ensure_database_exists, AccountStore, AppState, MemoryAccountStore,
    PgAccountStore, ServiceConfig, StoreBackend,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("account_service=info,tower_http=info")),
        )
        .init();

    let config = ServiceConfig::from_env()?;
    let store: Arc<dyn AccountStore> = match config.store_backend {
        StoreBackend::Postgres => {
            ensure_database_exists(&config.database_url).await?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(&config.database_url)
                .await?;
            ensure_accounts_table(&pool).await?;
            Arc::new(PgAccountStore::new(pool))
        }
        StoreBackend::Memory => {
            tracing::warn!("using in-memory store; accounts are lost on exit");
            Arc::new(MemoryAccountStore::new())
        }
    };

    let bind_addr = config.bind_addr;
    if !config.force_https {
        tracing::warn!("HTTPS enforcement is disabled");
    }
    let router = app(AppState::new(store, config));

    let listener = TcpListener::bind(bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
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
    tracing::info!("shutdown signal received");
}
