/// Business logic services layer: fetch rows from the store and shape them for the API
use crate::domain::{
    Axis, EtaRecord, EtaRow, EtaStatus, Location, PortDetail, PortList, PortRow, PortSummary,
    Ship, StormAlert, StormInfo, StormLevel, StormRow, StormStatus, ValidationError, VoyageRow,
    DEFAULT_PORT_STATUS, DEFAULT_SHIP_STATUS,
};
use crate::errors::{ApiError, ApiResult};
use crate::repo::Store;
use crate::utils::{check_coordinate, iso8601, round6};
use std::sync::Arc;
use tracing::{error, warn};

/// Port lookup service
pub struct PortService {
    store: Arc<dyn Store>,
}

impl PortService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// All ports; rows that cannot be mapped are skipped
    pub async fn list(&self) -> ApiResult<PortList> {
        let rows = self.store.list_ports().await.inspect_err(|e| {
            error!("Error fetching ports: {}", e);
        })?;

        let ports = rows
            .into_iter()
            .filter_map(|row| {
                let id = row.id;
                map_port_summary(row)
                    .inspect_err(|e| warn!("Skipping port {:?}: {}", id, e))
                    .ok()
            })
            .collect();

        Ok(PortList { ports })
    }

    pub async fn get(&self, id: i64) -> ApiResult<PortDetail> {
        let row = self
            .store
            .find_port(id)
            .await
            .inspect_err(|e| error!("Error fetching port {}: {}", id, e))?
            .ok_or_else(|| ApiError::NotFound("Port not found".to_string()))?;

        map_port_detail(row).map_err(|e| {
            error!("Port {} is unusable: {}", id, e);
            ApiError::Internal(e.to_string())
        })
    }
}

/// ETA and ship tracking service
pub struct EtaService {
    store: Arc<dyn Store>,
}

impl EtaService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> ApiResult<Vec<EtaRecord>> {
        let rows = self
            .store
            .list_eta()
            .await
            .inspect_err(|e| error!("Error fetching ETA records: {}", e))?;

        Ok(rows
            .into_iter()
            .filter_map(|row| {
                map_eta(row)
                    .inspect_err(|e| warn!("Skipping ETA record: {}", e))
                    .ok()
            })
            .collect())
    }

    pub async fn get(&self, ship_name: &str) -> ApiResult<EtaRecord> {
        let row = self
            .store
            .latest_eta(ship_name)
            .await
            .inspect_err(|e| error!("Error fetching ETA for {}: {}", ship_name, e))?
            .ok_or_else(|| ApiError::NotFound("Ship not found".to_string()))?;

        map_eta(row).map_err(|e| ApiError::Internal(e.to_string()))
    }

    /// Ships still under way, earliest arrival first
    pub async fn ships(&self) -> ApiResult<Vec<Ship>> {
        let rows = self
            .store
            .list_upcoming_voyages()
            .await
            .inspect_err(|e| error!("Error fetching ships: {}", e))?;

        Ok(rows
            .into_iter()
            .filter_map(|row| {
                map_ship(row)
                    .inspect_err(|e| warn!("Skipping ship: {}", e))
                    .ok()
            })
            .collect())
    }
}

/// Storm advisory service
pub struct StormService {
    store: Arc<dyn Store>,
}

impl StormService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> ApiResult<Vec<StormInfo>> {
        let rows = self
            .store
            .list_storms()
            .await
            .inspect_err(|e| error!("Error fetching storms: {}", e))?;

        Ok(rows
            .into_iter()
            .filter_map(|row| {
                map_storm(row)
                    .inspect_err(|e| warn!("Skipping storm: {}", e))
                    .ok()
            })
            .collect())
    }

    pub async fn alerts(&self) -> ApiResult<Vec<StormAlert>> {
        let rows = self
            .store
            .list_storms()
            .await
            .inspect_err(|e| error!("Error fetching storm alerts: {}", e))?;

        Ok(build_alerts(rows))
    }
}

// ---------------------------------------------------------------------------
// Row mapping
// ---------------------------------------------------------------------------

/// Out-of-range coordinates are logged and dropped to `None`
fn coordinate(value: Option<f64>, axis: Axis) -> Option<f64> {
    check_coordinate(value, axis)
        .inspect_err(|e| warn!("{}", e))
        .ok()
        .flatten()
}

pub fn map_port_summary(row: PortRow) -> Result<PortSummary, ValidationError> {
    let id = row.id.ok_or(ValidationError::MissingField("id"))?;
    let name = row.name.ok_or(ValidationError::MissingField("port_name"))?;

    Ok(PortSummary {
        id,
        name,
        region: row.region,
        country: row.country,
        location: Location {
            latitude: coordinate(row.latitude, Axis::Latitude),
            longitude: coordinate(row.longitude, Axis::Longitude),
        },
        status: row
            .status
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_PORT_STATUS.to_string()),
    })
}

pub fn map_port_detail(row: PortRow) -> Result<PortDetail, ValidationError> {
    let last_updated = row.created_at.as_ref().map(iso8601);
    Ok(PortDetail {
        summary: map_port_summary(row)?,
        last_updated,
    })
}

pub fn map_eta(row: EtaRow) -> Result<EtaRecord, ValidationError> {
    let ship_name = row.ship_name.ok_or(ValidationError::MissingField("ship_name"))?;
    let delay_hours = row.delay_hours.unwrap_or(0.0);

    Ok(EtaRecord {
        ship_name,
        port_from: row.port_from,
        port_to: row.port_to,
        eta_expected: row.eta_expected.as_ref().map(iso8601),
        delay_hours,
        status: EtaStatus::from_delay(delay_hours),
        reason: row.reason.filter(|r| !r.is_empty()),
        distance_to_hazard: row.distance_to_hazard.unwrap_or(0.0),
        latitude: row.latitude.map(round6),
        longitude: row.longitude.map(round6),
        from_lat: row.from_lat,
        from_lng: row.from_lng,
        to_lat: row.to_lat,
        to_lng: row.to_lng,
    })
}

pub fn map_ship(row: VoyageRow) -> Result<Ship, ValidationError> {
    let name = row.ship_name.ok_or(ValidationError::MissingField("ship_name"))?;
    let route = format!(
        "{} → {}",
        row.port_from.as_deref().unwrap_or("?"),
        row.port_to.as_deref().unwrap_or("?")
    );

    Ok(Ship {
        id: name.clone(),
        name,
        route,
        eta: row.eta_expected.as_ref().map(iso8601),
        delay_hours: row.delay_hours.unwrap_or(0.0),
        status: row
            .status
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_SHIP_STATUS.to_string()),
        reason: row.reason,
        lat: row.latitude,
        lng: row.longitude,
    })
}

pub fn map_storm(row: StormRow) -> Result<StormInfo, ValidationError> {
    Ok(StormInfo {
        id: row.id.ok_or(ValidationError::MissingField("id"))?,
        name: row.name,
        latitude: row.latitude,
        longitude: row.longitude,
        wind_kmh: row.wind_kmh,
        level: row.level,
        radius_km: row.radius_km,
        warning_radius_km: row.warning_radius_km,
    })
}

pub fn map_alert(row: StormRow) -> Result<StormAlert, ValidationError> {
    let alert_id = row.id.ok_or(ValidationError::MissingField("id"))?;
    let level = StormLevel::parse(row.level.as_deref());

    Ok(StormAlert {
        alert_id,
        message: row.name.unwrap_or_default(),
        severity: level.severity(),
        status: StormStatus::from_wind(row.wind_kmh.unwrap_or(0.0)),
        latitude: row.latitude,
        longitude: row.longitude,
        radius_km: row.radius_km,
        warning_radius_km: row.warning_radius_km,
        wind_kmh: row.wind_kmh,
    })
}

/// Map storms to alerts ordered by level rank, then wind speed descending
pub fn build_alerts(rows: Vec<StormRow>) -> Vec<StormAlert> {
    let mut ranked: Vec<(u8, StormAlert)> = rows
        .into_iter()
        .filter_map(|row| {
            let rank = StormLevel::parse(row.level.as_deref()).rank();
            map_alert(row)
                .inspect_err(|e| warn!("Skipping storm alert: {}", e))
                .ok()
                .map(|alert| (rank, alert))
        })
        .collect();

    ranked.sort_by(|(rank_a, a), (rank_b, b)| {
        let wind_a = a.wind_kmh.unwrap_or(f64::NEG_INFINITY);
        let wind_b = b.wind_kmh.unwrap_or(f64::NEG_INFINITY);
        rank_a.cmp(rank_b).then_with(|| wind_b.total_cmp(&wind_a))
    });

    ranked.into_iter().map(|(_, alert)| alert).collect()
}
