//! HTTP route handlers and router configuration

mod crane;
mod documents;
mod health;
mod ports;
mod tiles;
mod trail;

use crate::state::AppState;
use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the application router
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        // Crane telemetry
        .route("/api/trackers/", get(crane::trackers))
        .route("/api/trackers/:id", get(crane::tracker))
        .route("/api/transmissions_count/", get(crane::transmissions_count))
        .route("/api/transmissions_by_id/:id", get(crane::transmissions_by_id))
        .route(
            "/api/transmissions_by_amount/:id/:amount",
            get(crane::transmissions_by_amount),
        )
        .route(
            "/api/transmissions_by_dtg/:id/:d1/:d2",
            get(crane::transmissions_by_dtg),
        )
        .route(
            "/api/transmissions_in_polygon/:id/:coords",
            get(crane::transmissions_in_polygon),
        )
        // GPS routes
        .route("/api/trails/", get(trail::trails))
        .route("/api/trails/:id", get(trail::trail))
        .route("/api/signals_count/", get(trail::signals_count))
        .route("/api/signals_by_id/:id", get(trail::signals_by_id))
        .route(
            "/api/signals_by_amount/:id/:amount",
            get(trail::signals_by_amount),
        )
        .route("/api/signals_by_dtg/:id/:d1/:d2", get(trail::signals_by_dtg))
        .route(
            "/api/signals_in_polygon/:id/:coords",
            get(trail::signals_in_polygon),
        )
        // World Port Index
        .route("/api/ports_count/", get(ports::ports_count))
        .route("/api/ports/", get(ports::ports))
        // Tile server
        .route("/api/get_tilestache_entries/", get(tiles::entries))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
