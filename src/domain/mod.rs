/// Domain models: raw rows as read from the store and the payloads served over HTTP
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;
use thiserror::Error;

/// Status label used when a port row carries none
pub const DEFAULT_PORT_STATUS: &str = "ổn định";

/// Status label used when a voyage row carries none
pub const DEFAULT_SHIP_STATUS: &str = "active";

// ---------------------------------------------------------------------------
// Rows
// ---------------------------------------------------------------------------

/// `sea_ports` row
#[derive(Debug, Clone, Default, PartialEq, sqlx::FromRow)]
pub struct PortRow {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub status: Option<String>,
    /// Only selected for single-port lookups
    #[sqlx(default)]
    pub created_at: Option<NaiveDateTime>,
}

/// `eta_results` row enriched with both endpoint ports' coordinates
#[derive(Debug, Clone, Default, PartialEq, sqlx::FromRow)]
pub struct EtaRow {
    pub ship_name: Option<String>,
    pub port_from: Option<String>,
    pub port_to: Option<String>,
    pub eta_expected: Option<NaiveDateTime>,
    pub delay_hours: Option<f64>,
    pub reason: Option<String>,
    pub distance_to_hazard: Option<f64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub from_lat: Option<f64>,
    pub from_lng: Option<f64>,
    pub to_lat: Option<f64>,
    pub to_lng: Option<f64>,
}

/// `eta_results` row joined with its destination port
#[derive(Debug, Clone, Default, PartialEq, sqlx::FromRow)]
pub struct VoyageRow {
    pub ship_name: Option<String>,
    pub port_from: Option<String>,
    pub port_to: Option<String>,
    pub eta_expected: Option<NaiveDateTime>,
    pub delay_hours: Option<f64>,
    pub status: Option<String>,
    pub reason: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// `storm_info` row
#[derive(Debug, Clone, Default, PartialEq, sqlx::FromRow)]
pub struct StormRow {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub wind_kmh: Option<f64>,
    pub level: Option<String>,
    pub radius_km: Option<f64>,
    pub warning_radius_km: Option<f64>,
}

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Location {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortSummary {
    pub id: i64,
    pub name: String,
    pub region: Option<String>,
    pub country: Option<String>,
    pub location: Location,
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct PortList {
    pub ports: Vec<PortSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortDetail {
    #[serde(flatten)]
    pub summary: PortSummary,
    pub last_updated: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EtaRecord {
    pub ship_name: String,
    pub port_from: Option<String>,
    pub port_to: Option<String>,
    pub eta_expected: Option<String>,
    pub delay_hours: f64,
    pub status: EtaStatus,
    pub reason: Option<String>,
    pub distance_to_hazard: f64,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub from_lat: Option<f64>,
    pub from_lng: Option<f64>,
    pub to_lat: Option<f64>,
    pub to_lng: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ship {
    pub id: String,
    pub name: String,
    pub route: String,
    pub eta: Option<String>,
    pub delay_hours: f64,
    pub status: String,
    pub reason: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StormInfo {
    pub id: i64,
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub wind_kmh: Option<f64>,
    pub level: Option<String>,
    pub radius_km: Option<f64>,
    pub warning_radius_km: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StormAlert {
    pub alert_id: i64,
    pub message: String,
    pub severity: StormSeverity,
    pub status: StormStatus,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub radius_km: Option<f64>,
    pub warning_radius_km: Option<f64>,
    pub wind_kmh: Option<f64>,
}

/// Root banner
#[derive(Serialize)]
pub struct Banner {
    pub message: &'static str,
}

/// Health check response
#[derive(Serialize)]
pub struct Health {
    pub status: &'static str,
    pub now: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Delay-derived voyage status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EtaStatus {
    Active,
    Warning,
    Inactive,
}

impl EtaStatus {
    /// 0 h is on time, more than 4 h is off schedule, anything in between is a warning.
    pub fn from_delay(delay_hours: f64) -> Self {
        if delay_hours == 0.0 {
            EtaStatus::Active
        } else if delay_hours > 4.0 {
            EtaStatus::Inactive
        } else {
            EtaStatus::Warning
        }
    }
}

/// Categorical storm level as stored in `storm_info.level`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StormLevel {
    SuperTyphoon,
    Category5,
    Category4,
    Category3,
    Category2,
    Category1,
    TropicalStorm,
    Other,
}

impl StormLevel {
    pub fn parse(level: Option<&str>) -> Self {
        match level {
            Some("Super Typhoon") => StormLevel::SuperTyphoon,
            Some("Category 5") => StormLevel::Category5,
            Some("Category 4") => StormLevel::Category4,
            Some("Category 3") => StormLevel::Category3,
            Some("Category 2") => StormLevel::Category2,
            Some("Category 1") => StormLevel::Category1,
            Some("Tropical Storm") => StormLevel::TropicalStorm,
            _ => StormLevel::Other,
        }
    }

    /// Position in the alert listing; lower sorts first.
    pub fn rank(self) -> u8 {
        match self {
            StormLevel::SuperTyphoon => 1,
            StormLevel::Category5 => 2,
            StormLevel::Category4 => 3,
            StormLevel::Category3 => 4,
            StormLevel::Category2 => 5,
            StormLevel::Category1 => 6,
            StormLevel::TropicalStorm => 7,
            StormLevel::Other => 8,
        }
    }

    pub fn severity(self) -> StormSeverity {
        match self {
            StormLevel::SuperTyphoon => StormSeverity::Critical,
            StormLevel::Category5 | StormLevel::Category4 => StormSeverity::High,
            StormLevel::Category3 | StormLevel::Category2 | StormLevel::Category1 => {
                StormSeverity::Medium
            }
            StormLevel::TropicalStorm | StormLevel::Other => StormSeverity::Low,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StormSeverity {
    Critical,
    High,
    Medium,
    Low,
}

/// Wind-speed-derived storm label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StormStatus {
    SuperTyphoon,
    SevereStorm,
    Storm,
    TropicalDepression,
}

impl Serialize for StormStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl StormStatus {
    pub fn from_wind(wind_kmh: f64) -> Self {
        if wind_kmh > 150.0 {
            StormStatus::SuperTyphoon
        } else if wind_kmh > 120.0 {
            StormStatus::SevereStorm
        } else if wind_kmh > 80.0 {
            StormStatus::Storm
        } else {
            StormStatus::TropicalDepression
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StormStatus::SuperTyphoon => "Siêu bão",
            StormStatus::SevereStorm => "Bão mạnh",
            StormStatus::Storm => "Bão",
            StormStatus::TropicalDepression => "Áp thấp nhiệt đới",
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    pub fn limit(self) -> f64 {
        match self {
            Axis::Latitude => 90.0,
            Axis::Longitude => 180.0,
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Latitude => f.write_str("latitude"),
            Axis::Longitude => f.write_str("longitude"),
        }
    }
}

/// Mapping-time validation failure; degrades output, never reaches the client
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("invalid {axis} value: {value}")]
    CoordinateOutOfRange { axis: Axis, value: f64 },
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eta_status_thresholds() {
        assert_eq!(EtaStatus::from_delay(0.0), EtaStatus::Active);
        assert_eq!(EtaStatus::from_delay(0.5), EtaStatus::Warning);
        assert_eq!(EtaStatus::from_delay(4.0), EtaStatus::Warning);
        assert_eq!(EtaStatus::from_delay(4.01), EtaStatus::Inactive);
        assert_eq!(EtaStatus::from_delay(36.0), EtaStatus::Inactive);
    }

    #[test]
    fn test_storm_status_boundaries() {
        assert_eq!(StormStatus::from_wind(0.0), StormStatus::TropicalDepression);
        assert_eq!(StormStatus::from_wind(80.0), StormStatus::TropicalDepression);
        assert_eq!(StormStatus::from_wind(80.5), StormStatus::Storm);
        assert_eq!(StormStatus::from_wind(120.0), StormStatus::Storm);
        assert_eq!(StormStatus::from_wind(121.0), StormStatus::SevereStorm);
        assert_eq!(StormStatus::from_wind(150.0), StormStatus::SevereStorm);
        assert_eq!(StormStatus::from_wind(150.1), StormStatus::SuperTyphoon);
    }

    #[test]
    fn test_storm_status_serializes_to_label() {
        for status in [
            StormStatus::SuperTyphoon,
            StormStatus::SevereStorm,
            StormStatus::Storm,
            StormStatus::TropicalDepression,
        ] {
            assert_eq!(serde_json::to_value(status).unwrap(), status.label());
        }
        assert_eq!(
            serde_json::to_value(StormStatus::TropicalDepression).unwrap(),
            "Áp thấp nhiệt đới"
        );
    }

    #[test]
    fn test_storm_severity_by_level() {
        let severity = |level: &str| StormLevel::parse(Some(level)).severity();
        assert_eq!(severity("Super Typhoon"), StormSeverity::Critical);
        assert_eq!(severity("Category 5"), StormSeverity::High);
        assert_eq!(severity("Category 4"), StormSeverity::High);
        assert_eq!(severity("Category 3"), StormSeverity::Medium);
        assert_eq!(severity("Category 2"), StormSeverity::Medium);
        assert_eq!(severity("Category 1"), StormSeverity::Medium);
        assert_eq!(severity("Tropical Storm"), StormSeverity::Low);
        assert_eq!(severity("category 5"), StormSeverity::Low);
        assert_eq!(StormLevel::parse(None).severity(), StormSeverity::Low);
    }

    #[test]
    fn test_storm_rank_table() {
        let ranks: Vec<u8> = [
            "Super Typhoon",
            "Category 5",
            "Category 4",
            "Category 3",
            "Category 2",
            "Category 1",
            "Tropical Storm",
            "Depression",
        ]
        .iter()
        .map(|l| StormLevel::parse(Some(l)).rank())
        .collect();
        assert_eq!(ranks, vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_eta_status_serializes_lowercase() {
        assert_eq!(serde_json::to_value(EtaStatus::Inactive).unwrap(), "inactive");
    }
}
