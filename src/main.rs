/// Shipping reference-data API: ports, vessel ETAs and storm advisories
mod config;
mod domain;
mod errors;
mod handlers;
mod repo;
mod routes;
mod services;
mod utils;

use crate::config::AppConfig;
use crate::handlers::AppState;
use crate::repo::{MySqlStore, Store};
use crate::routes::build_router;
use crate::services::{EtaService, PortService, StormService};
use sqlx::mysql::MySqlPoolOptions;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    // Load configuration
    let config = AppConfig::from_env()?;
    info!("Configuration loaded: {:?}", config);

    // Connections are opened on first use so the API starts even when the database is down
    let pool = MySqlPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout)
        .connect_lazy_with(config.database.connect_options()?);

    let store: Arc<dyn Store> = Arc::new(MySqlStore::new(pool.clone()));

    let state = AppState {
        port_service: Arc::new(PortService::new(store.clone())),
        eta_service: Arc::new(EtaService::new(store.clone())),
        storm_service: Arc::new(StormService::new(store)),
    };

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("shipping_api listening on {}", config.bind_addr);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    info!("shipping_api stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
