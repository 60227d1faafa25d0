//! Shared application state

use geostack::{
    CRANE, Config, PortLookup, QueryLimits, Repository, TRAIL, TileIndex, TileIndexError,
    open_store,
};
use geostack::store::DocumentStore;
use std::sync::Arc;
use tracing::{info, warn};

/// Handles built once at startup and shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub crane: Repository,
    pub trail: Repository,
    /// `None` when the port database settings are unusable
    pub ports: Option<PortLookup>,
    /// `None` when no tile index URL is configured
    pub tiles: Option<TileIndex>,
}

impl AppState {
    pub fn new(
        crane: Arc<dyn DocumentStore>,
        trail: Arc<dyn DocumentStore>,
        limits: QueryLimits,
    ) -> Self {
        Self {
            crane: Repository::new(CRANE, limits, crane),
            trail: Repository::new(TRAIL, limits, trail),
            ports: None,
            tiles: None,
        }
    }

    pub fn with_ports(mut self, ports: PortLookup) -> Self {
        self.ports = Some(ports);
        self
    }

    pub fn with_tiles(mut self, tiles: TileIndex) -> Self {
        self.tiles = Some(tiles);
        self
    }

    /// Open every backend named in the configuration.
    ///
    /// Document stores must open; the port pool and tile index are optional
    /// and only logged when unavailable.
    pub async fn from_config(config: &Config) -> anyhow::Result<Self> {
        let crane = open_store(&config.crane, &CRANE).await?;
        let trail = open_store(&config.trail, &TRAIL).await?;
        info!(
            crane = crane.backend_name(),
            trail = trail.backend_name(),
            "document stores ready"
        );

        let mut state = Self::new(crane, trail, config.limits);

        match PortLookup::connect_lazy(&config.ports) {
            Ok(ports) => state = state.with_ports(ports),
            Err(e) => warn!("port lookups disabled: {}", e),
        }

        match TileIndex::from_config(&config.tiles) {
            Ok(tiles) => {
                info!("tile index at {}", tiles.url());
                state = state.with_tiles(tiles);
            }
            Err(TileIndexError::NotConfigured) => info!("no tile index configured"),
            Err(e) => warn!("tile index disabled: {}", e),
        }

        Ok(state)
    }
}
