//! GeoStack Server
//!
//! Read-only HTTP API over the crane telemetry, trail, World Port Index and
//! tile index datasets.
//!
//! # Example
//!
//! ```ignore
//! use geostack_server::{AppState, run_server};
//!
//! let state = AppState::from_config(&config).await?;
//! run_server(listener, Arc::new(state), shutdown).await?;
//! ```

pub mod error;
pub mod routes;
pub mod state;
pub mod transport;

pub use error::{ApiError, ApiResult};
pub use routes::build_router;
pub use state::AppState;
pub use transport::http::run_server;
