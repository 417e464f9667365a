/// Application routes configuration
use crate::handlers::{
    get_eta, get_port, health, list_eta, list_ports, list_ships, list_storm_alerts, list_storms,
    root, AppState,
};
use axum::{routing::get, Router};
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the application router with all routes
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        // Ports
        .route("/api/ports", get(list_ports))
        .route("/api/ports/:port_id", get(get_port))
        // ETA and ships
        .route("/api/eta", get(list_eta))
        .route("/api/eta/:ship_name", get(get_eta))
        .route("/api/ships", get(list_ships))
        // Storms
        .route("/api/storms", get(list_storms))
        .route("/api/storm-alerts", get(list_storm_alerts))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
