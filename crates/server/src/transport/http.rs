//! HTTP transport
//!
//! # Example
//!
//! ```ignore
//! use geostack_server::run_server;
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await?;
//! run_server(listener, Arc::new(state), shutdown).await?;
//! ```

use crate::routes::build_router;
use crate::state::AppState;
use std::future::Future;
use std::sync::Arc;
use tracing::info;

/// Serve the API on `listener` until `shutdown` resolves, then drain
/// in-flight requests.
///
/// # Errors
/// Returns an error if the listener address cannot be read or serving fails.
pub async fn run_server(
    listener: tokio::net::TcpListener,
    state: Arc<AppState>,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    let router = build_router(state);

    info!("GeoStack API listening on {}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            shutdown.await;
            info!("Shutdown signal received, stopping server...");
        })
        .await?;

    Ok(())
}
