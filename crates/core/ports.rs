//! World Port Index lookups against the relational `wpi` table.

use crate::config::PortsConfig;
use geostack_types::port::Port;
use sqlx::AnyPool;
use sqlx::any::AnyPoolOptions;
use thiserror::Error;

const COUNT_SQL: &str = "SELECT COUNT(*) FROM wpi";
const PORTS_SQL: &str = "SELECT CAST(longitude AS DOUBLE PRECISION), CAST(latitude AS DOUBLE PRECISION), port_name, country FROM wpi";

#[derive(Debug, Error)]
pub enum PortLookupError {
    #[error("Invalid port database settings: {0}")]
    Config(String),

    #[error("Port database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type PortResult<T> = std::result::Result<T, PortLookupError>;

/// Read-only access to the port table through a bounded connection pool.
#[derive(Clone)]
pub struct PortLookup {
    pool: AnyPool,
}

impl PortLookup {
    /// Build the pool without connecting; the first query opens a connection.
    pub fn connect_lazy(config: &PortsConfig) -> PortResult<Self> {
        sqlx::any::install_default_drivers();

        let url = config
            .connection_url()
            .map_err(|e| PortLookupError::Config(e.to_string()))?;

        let pool = AnyPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout())
            .connect_lazy(&url)?;

        Ok(Self { pool })
    }

    pub fn from_pool(pool: AnyPool) -> Self {
        Self { pool }
    }

    /// Number of rows in the port table.
    pub async fn count(&self) -> PortResult<i64> {
        let (count,): (i64,) = sqlx::query_as(COUNT_SQL).fetch_one(&self.pool).await?;
        Ok(count)
    }

    /// Every port, in table order.
    pub async fn all(&self) -> PortResult<Vec<Port>> {
        let rows: Vec<(Option<f64>, Option<f64>, Option<String>, Option<String>)> =
            sqlx::query_as(PORTS_SQL).fetch_all(&self.pool).await?;
        log::debug!("ports: fetched {} rows", rows.len());
        Ok(rows.into_iter().map(Port::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn sqlite_lookup(rows: &[(f64, f64, &str, &str)]) -> PortLookup {
        sqlx::any::install_default_drivers();
        // A single connection keeps every query on the same in-memory database
        let pool = AnyPoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        sqlx::query(
            "CREATE TABLE wpi (longitude REAL, latitude REAL, port_name TEXT, country TEXT)",
        )
        .execute(&pool)
        .await
        .unwrap();

        for (lon, lat, name, country) in rows {
            sqlx::query("INSERT INTO wpi VALUES (?, ?, ?, ?)")
                .bind(*lon)
                .bind(*lat)
                .bind(*name)
                .bind(*country)
                .execute(&pool)
                .await
                .unwrap();
        }

        PortLookup::from_pool(pool)
    }

    #[tokio::test]
    async fn test_empty_table() {
        let lookup = sqlite_lookup(&[]).await;
        assert_eq!(lookup.count().await.unwrap(), 0);
        assert!(lookup.all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rows_in_table_order() {
        let lookup = sqlite_lookup(&[
            (4.29, 51.9, "ROTTERDAM", "NL"),
            (3.2, 51.33, "ZEEBRUGGE", "BE"),
        ])
        .await;

        assert_eq!(lookup.count().await.unwrap(), 2);
        let ports = lookup.all().await.unwrap();
        assert_eq!(ports.len(), 2);
        assert_eq!(ports[0].name.as_deref(), Some("ROTTERDAM"));
        assert_eq!(ports[1].longitude, Some(3.2));
    }

    #[tokio::test]
    async fn test_null_coordinates_keep_the_row() {
        let lookup = sqlite_lookup(&[(4.29, 51.9, "ROTTERDAM", "NL")]).await;
        sqlx::query("INSERT INTO wpi VALUES (NULL, 45.9, 'X', 'FR')")
            .execute(&lookup.pool)
            .await
            .unwrap();

        let ports = lookup.all().await.unwrap();
        assert_eq!(ports.len(), 2);
        assert_eq!(ports[1].longitude, None);
        assert_eq!(
            serde_json::to_string(&ports[1]).unwrap(),
            r#"[null,45.9,"X","FR"]"#
        );
    }

    #[tokio::test]
    async fn test_missing_table_is_an_error() {
        sqlx::any::install_default_drivers();
        let pool = AnyPoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        let lookup = PortLookup::from_pool(pool);
        assert!(matches!(
            lookup.count().await,
            Err(PortLookupError::Database(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_database() {
        let config = PortsConfig {
            url: Some("postgres://postgres@127.0.0.1:1/none".to_string()),
            acquire_timeout_ms: 500,
            ..PortsConfig::default()
        };
        let lookup = PortLookup::connect_lazy(&config).unwrap();
        assert!(lookup.all().await.is_err());
    }
}
