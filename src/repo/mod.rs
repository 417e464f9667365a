/// Repository layer for database operations
use crate::domain::{EtaRow, PortRow, StormRow, VoyageRow};
use crate::errors::{ApiError, ApiResult};
use async_trait::async_trait;
use sqlx::mysql::MySqlPool;
use sqlx::pool::PoolConnection;
use sqlx::MySql;

#[cfg(test)]
pub mod memory;

/// Read access to the shipping reference tables
#[async_trait]
pub trait Store: Send + Sync {
    /// All ports ordered by name
    async fn list_ports(&self) -> ApiResult<Vec<PortRow>>;

    async fn find_port(&self, id: i64) -> ApiResult<Option<PortRow>>;

    /// ETA records that carry a position, ordered by ship name
    async fn list_eta(&self) -> ApiResult<Vec<EtaRow>>;

    /// Most recently created ETA record for a ship
    async fn latest_eta(&self, ship_name: &str) -> ApiResult<Option<EtaRow>>;

    /// Voyages arriving strictly after the database's current time, earliest first
    async fn list_upcoming_voyages(&self) -> ApiResult<Vec<VoyageRow>>;

    /// All storms, strongest wind first
    async fn list_storms(&self) -> ApiResult<Vec<StormRow>>;
}

const PORT_COLUMNS: &str = "SELECT CAST(id AS SIGNED) AS id,
        port_name AS name,
        region,
        country,
        CAST(latitude AS DOUBLE) AS latitude,
        CAST(longitude AS DOUBLE) AS longitude,
        status";

// TIMESTAMP columns only decode as `NaiveDateTime` once cast to DATETIME.
fn list_ports_sql() -> String {
    format!("{PORT_COLUMNS} FROM sea_ports ORDER BY port_name")
}

fn find_port_sql() -> String {
    format!(
        "{PORT_COLUMNS}, CAST(created_at AS DATETIME) AS created_at
         FROM sea_ports
         WHERE id = ?"
    )
}

// Ports are matched by name; names shared by several ports resolve to no coordinates.
const UNIQUE_PORTS: &str = "(SELECT port_name,
            CAST(MIN(latitude) AS DOUBLE) AS lat,
            CAST(MIN(longitude) AS DOUBLE) AS lng
        FROM sea_ports
        GROUP BY port_name
        HAVING COUNT(*) = 1)";

fn eta_select() -> String {
    format!(
        "SELECT e.ship_name,
            e.port_from,
            e.port_to,
            CAST(e.eta_expected AS DATETIME) AS eta_expected,
            CAST(e.delay_hours AS DOUBLE) AS delay_hours,
            e.reason,
            CAST(e.distance_to_hazard AS DOUBLE) AS distance_to_hazard,
            CAST(e.latitude AS DOUBLE) AS latitude,
            CAST(e.longitude AS DOUBLE) AS longitude,
            p1.lat AS from_lat,
            p1.lng AS from_lng,
            p2.lat AS to_lat,
            p2.lng AS to_lng
         FROM eta_results e
         LEFT JOIN {UNIQUE_PORTS} p1 ON e.port_from = p1.port_name
         LEFT JOIN {UNIQUE_PORTS} p2 ON e.port_to = p2.port_name"
    )
}

// Compared against the database clock so the cutoff shares the stored values' time zone.
fn voyages_sql() -> String {
    format!(
        "SELECT er.ship_name,
            er.port_from,
            er.port_to,
            CAST(er.eta_expected AS DATETIME) AS eta_expected,
            CAST(er.delay_hours AS DOUBLE) AS delay_hours,
            er.status,
            er.reason,
            sp.lat AS latitude,
            sp.lng AS longitude
         FROM eta_results er
         LEFT JOIN {UNIQUE_PORTS} sp ON er.port_to = sp.port_name
         WHERE er.eta_expected > NOW()
         ORDER BY er.eta_expected ASC"
    )
}

/// MySQL-backed store; one pooled connection per call
#[derive(Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Acquire a connection for a single query. The guard returns it to the pool on drop.
    async fn conn(&self) -> ApiResult<PoolConnection<MySql>> {
        self.pool.acquire().await.map_err(ApiError::Connection)
    }
}

#[async_trait]
impl Store for MySqlStore {
    async fn list_ports(&self) -> ApiResult<Vec<PortRow>> {
        let mut conn = self.conn().await?;
        let rows = sqlx::query_as::<_, PortRow>(&list_ports_sql())
            .fetch_all(&mut *conn)
            .await
            .map_err(ApiError::Query)?;
        Ok(rows)
    }

    async fn find_port(&self, id: i64) -> ApiResult<Option<PortRow>> {
        let mut conn = self.conn().await?;
        let row = sqlx::query_as::<_, PortRow>(&find_port_sql())
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(ApiError::Query)?;
        Ok(row)
    }

    async fn list_eta(&self) -> ApiResult<Vec<EtaRow>> {
        let mut conn = self.conn().await?;
        let sql = format!(
            "{}
             WHERE e.latitude IS NOT NULL AND e.longitude IS NOT NULL
             ORDER BY e.ship_name ASC",
            eta_select()
        );
        let rows = sqlx::query_as::<_, EtaRow>(&sql)
            .fetch_all(&mut *conn)
            .await
            .map_err(ApiError::Query)?;
        Ok(rows)
    }

    async fn latest_eta(&self, ship_name: &str) -> ApiResult<Option<EtaRow>> {
        let mut conn = self.conn().await?;
        let sql = format!(
            "{}
             WHERE e.ship_name = ?
             ORDER BY e.created_at DESC
             LIMIT 1",
            eta_select()
        );
        let row = sqlx::query_as::<_, EtaRow>(&sql)
            .bind(ship_name)
            .fetch_optional(&mut *conn)
            .await
            .map_err(ApiError::Query)?;
        Ok(row)
    }

    async fn list_upcoming_voyages(&self) -> ApiResult<Vec<VoyageRow>> {
        let mut conn = self.conn().await?;
        let rows = sqlx::query_as::<_, VoyageRow>(&voyages_sql())
            .fetch_all(&mut *conn)
            .await
            .map_err(ApiError::Query)?;
        Ok(rows)
    }

    async fn list_storms(&self) -> ApiResult<Vec<StormRow>> {
        let mut conn = self.conn().await?;
        let rows = sqlx::query_as::<_, StormRow>(
            "SELECT CAST(id AS SIGNED) AS id,
                name,
                CAST(latitude AS DOUBLE) AS latitude,
                CAST(longitude AS DOUBLE) AS longitude,
                CAST(wind_kmh AS DOUBLE) AS wind_kmh,
                level,
                CAST(radius_km AS DOUBLE) AS radius_km,
                CAST(warning_radius_km AS DOUBLE) AS warning_radius_km
             FROM storm_info
             ORDER BY wind_kmh DESC",
        )
        .fetch_all(&mut *conn)
        .await
        .map_err(ApiError::Query)?;
        Ok(rows)
    }
}
