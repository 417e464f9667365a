/// HTTP request handlers
use crate::domain::{Banner, EtaRecord, Health, PortDetail, PortList, Ship, StormAlert, StormInfo};
use crate::errors::{ApiError, ApiResult};
use crate::services::{EtaService, PortService, StormService};
use axum::{extract::FromRequestParts, extract::State, Json};
use chrono::Utc;
use std::sync::Arc;

/// Path parameters whose extraction failures answer with the API's JSON error body
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct Path<T>(pub T);

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub port_service: Arc<PortService>,
    pub eta_service: Arc<EtaService>,
    pub storm_service: Arc<StormService>,
}

pub async fn root() -> Json<Banner> {
    Json(Banner {
        message: "Shipping ML API is running",
    })
}

/// Health check handler
pub async fn health() -> Json<Health> {
    Json(Health {
        status: "ok",
        now: Utc::now(),
    })
}

pub async fn list_ports(State(state): State<AppState>) -> ApiResult<Json<PortList>> {
    Ok(Json(state.port_service.list().await?))
}

pub async fn get_port(
    Path(port_id): Path<String>,
    State(state): State<AppState>,
) -> ApiResult<Json<PortDetail>> {
    let id = parse_id(&port_id)?;
    Ok(Json(state.port_service.get(id).await?))
}

pub async fn list_eta(State(state): State<AppState>) -> ApiResult<Json<Vec<EtaRecord>>> {
    Ok(Json(state.eta_service.list().await?))
}

pub async fn get_eta(
    Path(ship_name): Path<String>,
    State(state): State<AppState>,
) -> ApiResult<Json<EtaRecord>> {
    let ship_name = ship_name.trim();
    if ship_name.is_empty() {
        return Err(ApiError::InvalidInput("ship_name must not be empty".to_string()));
    }
    Ok(Json(state.eta_service.get(ship_name).await?))
}

pub async fn list_ships(State(state): State<AppState>) -> ApiResult<Json<Vec<Ship>>> {
    Ok(Json(state.eta_service.ships().await?))
}

pub async fn list_storms(State(state): State<AppState>) -> ApiResult<Json<Vec<StormInfo>>> {
    Ok(Json(state.storm_service.list().await?))
}

pub async fn list_storm_alerts(State(state): State<AppState>) -> ApiResult<Json<Vec<StormAlert>>> {
    Ok(Json(state.storm_service.alerts().await?))
}

fn parse_id(raw: &str) -> ApiResult<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ApiError::InvalidInput(format!("port id must be an integer, got `{}`", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert_eq!(parse_id("-3").unwrap(), -3);
        assert!(matches!(parse_id("abc"), Err(ApiError::InvalidInput(_))));
        assert!(matches!(parse_id("1.5"), Err(ApiError::InvalidInput(_))));
    }
}
