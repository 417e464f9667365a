//! In-memory `Store` used by tests. Mirrors the ordering and filtering the SQL performs.
use super::Store;
use crate::domain::{EtaRow, PortRow, StormRow, VoyageRow};
use crate::errors::{ApiError, ApiResult};
use async_trait::async_trait;
use chrono::{Local, NaiveDateTime};

#[derive(Default, Clone)]
pub struct MemoryStore {
    pub ports: Vec<PortRow>,
    /// ETA rows paired with their creation time
    pub eta: Vec<(NaiveDateTime, EtaRow)>,
    pub voyages: Vec<VoyageRow>,
    pub storms: Vec<StormRow>,
    /// Clock for upcoming voyages; the local wall clock when unset
    pub now: Option<NaiveDateTime>,
    pub offline: bool,
}

impl MemoryStore {
    /// A store whose every call fails as if the database were down
    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }

    fn check(&self) -> ApiResult<()> {
        if self.offline {
            return Err(ApiError::Connection(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn list_ports(&self) -> ApiResult<Vec<PortRow>> {
        self.check()?;
        let mut rows = self.ports.clone();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    async fn find_port(&self, id: i64) -> ApiResult<Option<PortRow>> {
        self.check()?;
        Ok(self.ports.iter().find(|p| p.id == Some(id)).cloned())
    }

    async fn list_eta(&self) -> ApiResult<Vec<EtaRow>> {
        self.check()?;
        let mut rows: Vec<EtaRow> = self
            .eta
            .iter()
            .map(|(_, row)| row.clone())
            .filter(|row| row.latitude.is_some() && row.longitude.is_some())
            .collect();
        rows.sort_by(|a, b| a.ship_name.cmp(&b.ship_name));
        Ok(rows)
    }

    async fn latest_eta(&self, ship_name: &str) -> ApiResult<Option<EtaRow>> {
        self.check()?;
        Ok(self
            .eta
            .iter()
            .filter(|(_, row)| row.ship_name.as_deref() == Some(ship_name))
            .max_by_key(|(created_at, _)| *created_at)
            .map(|(_, row)| row.clone()))
    }

    async fn list_upcoming_voyages(&self) -> ApiResult<Vec<VoyageRow>> {
        self.check()?;
        let cutoff = self.now.unwrap_or_else(|| Local::now().naive_local());
        let mut rows: Vec<VoyageRow> = self
            .voyages
            .iter()
            .filter(|row| row.eta_expected.is_some_and(|eta| eta > cutoff))
            .cloned()
            .collect();
        rows.sort_by_key(|row| row.eta_expected);
        Ok(rows)
    }

    async fn list_storms(&self) -> ApiResult<Vec<StormRow>> {
        self.check()?;
        let mut rows = self.storms.clone();
        rows.sort_by(|a, b| {
            b.wind_kmh
                .unwrap_or(f64::NEG_INFINITY)
                .total_cmp(&a.wind_kmh.unwrap_or(f64::NEG_INFINITY))
        });
        Ok(rows)
    }
}
