//! Service configuration.
//!
//! Every section has defaults matching a local GeoStack install, so an empty
//! document is a valid configuration.
use crate::error::{GeostackError, Result};
use serde::de::Error;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Top level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    /// Crane telemetry store (`tracker` / `transmission`)
    #[serde(default = "StoreConfig::default_crane")]
    pub crane: StoreConfig,

    /// GPS route store (`trail` / `signal`)
    #[serde(default = "StoreConfig::default_trail")]
    pub trail: StoreConfig,

    /// World Port Index database
    #[serde(default)]
    pub ports: PortsConfig,

    #[serde(default)]
    pub tiles: TilesConfig,

    #[serde(default)]
    pub limits: QueryLimits,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    #[serde(default = "ServerConfig::default_host")]
    pub host: String,

    #[serde(default = "ServerConfig::default_port")]
    pub port: u16,
}

impl ServerConfig {
    fn default_host() -> String {
        "0.0.0.0".to_string()
    }

    const fn default_port() -> u16 {
        5000
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
        }
    }
}

/// Which document store implementation serves a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    #[default]
    Mongodb,
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,

    /// Connection string; the database name is taken from its path.
    #[serde(default)]
    pub uri: String,

    /// Extended JSON file loaded into the in-memory backend at startup
    #[serde(default)]
    pub seed: Option<PathBuf>,
}

impl StoreConfig {
    fn default_crane() -> Self {
        Self::mongodb("mongodb://localhost:27017/Crane_Database")
    }

    fn default_trail() -> Self {
        Self::mongodb("mongodb://localhost:27017/Trail_Database")
    }

    pub fn mongodb(uri: impl Into<String>) -> Self {
        Self {
            backend: StoreBackend::Mongodb,
            uri: uri.into(),
            seed: None,
        }
    }

    pub fn memory() -> Self {
        Self {
            backend: StoreBackend::Memory,
            uri: String::new(),
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: impl Into<PathBuf>) -> Self {
        self.seed = Some(seed.into());
        self
    }

    fn validate(&self, name: &str) -> std::result::Result<(), String> {
        match self.backend {
            StoreBackend::Mongodb => {
                if cfg!(not(feature = "mongodb")) {
                    return Err(format!(
                        "{name}: the mongodb backend is not compiled in (enable the `mongodb` feature)"
                    ));
                }
                if self.uri.trim().is_empty() {
                    return Err(format!("{name}: uri must not be empty"));
                }
                if self.seed.is_some() {
                    return Err(format!("{name}: seed is only supported by the memory backend"));
                }
            }
            StoreBackend::Memory => {}
        }
        Ok(())
    }
}

/// Connection settings for the relational port table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PortsConfig {
    /// Full connection URL; takes precedence over the individual fields.
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default = "PortsConfig::default_host")]
    pub host: String,

    #[serde(default = "PortsConfig::default_database")]
    pub database: String,

    #[serde(default = "PortsConfig::default_user")]
    pub user: String,

    #[serde(default)]
    pub password: String,

    #[serde(default = "PortsConfig::default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "PortsConfig::default_acquire_timeout_ms")]
    pub acquire_timeout_ms: u64,
}

impl PortsConfig {
    fn default_host() -> String {
        "localhost".to_string()
    }

    fn default_database() -> String {
        "World_Port_Index_Database".to_string()
    }

    fn default_user() -> String {
        "postgres".to_string()
    }

    const fn default_max_connections() -> u32 {
        5
    }

    const fn default_acquire_timeout_ms() -> u64 {
        5_000
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_millis(self.acquire_timeout_ms)
    }

    /// Connection URL for the pool, built from the individual fields unless
    /// `url` is set. User and password are percent-encoded.
    pub fn connection_url(&self) -> Result<String> {
        if let Some(url) = &self.url {
            return Ok(url.clone());
        }

        let invalid = |what: &str| GeostackError::Config(format!("ports: invalid {what}"));

        let mut url = url::Url::parse("postgres://localhost")
            .map_err(|e| GeostackError::Config(e.to_string()))?;
        url.set_host(Some(&self.host)).map_err(|_| invalid("host"))?;
        url.set_username(&self.user).map_err(|_| invalid("user"))?;
        if !self.password.is_empty() {
            url.set_password(Some(&self.password))
                .map_err(|_| invalid("password"))?;
        }
        url.set_path(&self.database);
        Ok(url.to_string())
    }
}

impl Default for PortsConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: Self::default_host(),
            database: Self::default_database(),
            user: Self::default_user(),
            password: String::new(),
            max_connections: Self::default_max_connections(),
            acquire_timeout_ms: Self::default_acquire_timeout_ms(),
        }
    }
}

/// Tile server index page scraped by the tile entries endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TilesConfig {
    #[serde(default)]
    pub index_url: Option<String>,

    #[serde(default = "TilesConfig::default_timeout_ms")]
    pub timeout_ms: u64,
}

impl TilesConfig {
    const fn default_timeout_ms() -> u64 {
        10_000
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for TilesConfig {
    fn default() -> Self {
        Self {
            index_url: None,
            timeout_ms: Self::default_timeout_ms(),
        }
    }
}

/// Ceilings applied to caller supplied query sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QueryLimits {
    /// Largest `amount` accepted by the by-amount endpoints
    #[serde(default = "QueryLimits::default_max_amount")]
    pub max_amount: u64,

    /// Largest number of ring positions accepted by polygon queries
    #[serde(default = "QueryLimits::default_max_polygon_vertices")]
    pub max_polygon_vertices: usize,
}

impl QueryLimits {
    const fn default_max_amount() -> u64 {
        100_000
    }

    const fn default_max_polygon_vertices() -> usize {
        1_000
    }
}

impl Default for QueryLimits {
    fn default() -> Self {
        Self {
            max_amount: Self::default_max_amount(),
            max_polygon_vertices: Self::default_max_polygon_vertices(),
        }
    }
}

impl Config {
    pub fn with_crane(mut self, store: StoreConfig) -> Self {
        self.crane = store;
        self
    }

    pub fn with_trail(mut self, store: StoreConfig) -> Self {
        self.trail = store;
        self
    }

    pub fn with_ports(mut self, ports: PortsConfig) -> Self {
        self.ports = ports;
        self
    }

    pub fn with_tiles_index(mut self, url: impl Into<String>) -> Self {
        self.tiles.index_url = Some(url.into());
        self
    }

    pub fn with_limits(mut self, limits: QueryLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn validate(&self) -> std::result::Result<(), String> {
        self.crane.validate("crane")?;
        self.trail.validate("trail")?;

        if self.ports.max_connections == 0 {
            return Err("ports: max_connections must be greater than zero".to_string());
        }

        if self.limits.max_amount == 0 {
            return Err("limits: max_amount must be greater than zero".to_string());
        }

        // A closed ring needs at least four positions
        if self.limits.max_polygon_vertices < 4 {
            return Err("limits: max_polygon_vertices must be at least 4".to_string());
        }

        if let Some(url) = &self.tiles.index_url
            && url::Url::parse(url).is_err()
        {
            return Err(format!("tiles: invalid index_url '{url}'"));
        }

        Ok(())
    }

    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        let config: Config = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            return Err(serde_json::Error::custom(e));
        }
        Ok(config)
    }

    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> std::result::Result<Self, toml::de::Error> {
        let config: Config = toml::from_str(toml_str)?;
        if let Err(e) = config.validate() {
            return Err(toml::de::Error::custom(e));
        }
        Ok(config)
    }

    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            crane: StoreConfig::default_crane(),
            trail: StoreConfig::default_trail(),
            ports: PortsConfig::default(),
            tiles: TilesConfig::default(),
            limits: QueryLimits::default(),
        }
    }
}
