//! Read-only query layer over the GeoStack datasets.
//!
//! ## Datasets
//! - **Crane**: `tracker` documents and their `transmission`s
//! - **Trail**: `trail` documents and their `signal` trackpoints
//! - **Ports**: the relational World Port Index table
//! - **Tiles**: the tile server's HTML index page
//!
//! Request parameters arrive as raw strings. A [`QueryBuilder`] validates
//! them into a backend neutral [`Query`], which a [`DocumentStore`] answers
//! either from MongoDB or from the in-memory [`MemoryStore`].
//!
//! ```rust
//! use geostack::prelude::*;
//! use std::sync::Arc;
//!
//! # tokio_test_block(async {
//! let store = MemoryStore::for_dataset(&CRANE);
//! store.load_extjson(r#"{
//!     "tracker": [{"_id": {"$oid": "5e2aec9e0bd1ad3f3ce7a1a4"}, "name": "Agnetha"}]
//! }"#)?;
//!
//! let cranes = Repository::new(CRANE, QueryLimits::default(), Arc::new(store));
//! let found = cranes.parent("5e2aec9e0bd1ad3f3ce7a1a4").await?;
//! assert_eq!(documents_to_json(found)[0]["name"], "Agnetha");
//! # Ok::<(), GeostackError>(())
//! # });
//! # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

pub mod config;
pub mod dataset;
pub mod error;
pub mod ports;
pub mod query;
pub mod repository;
pub mod shape;
pub mod store;
pub mod tiles;

pub use config::{Config, QueryLimits, StoreBackend, StoreConfig};
pub use dataset::{CRANE, Dataset, TRAIL};
pub use error::{GeostackError, Result};
pub use ports::{PortLookup, PortLookupError};
pub use query::{Predicate, Query, QueryBuilder};
pub use repository::Repository;
pub use store::{DocumentStore, MemoryStore, open_store};
#[cfg(feature = "mongodb")]
pub use store::MongoStore;
pub use tiles::{TileIndex, TileIndexError};

pub use geostack_types::geo::{Point, Polygon};

pub mod prelude {
    pub use crate::config::{Config, QueryLimits};
    pub use crate::dataset::{CRANE, TRAIL};
    pub use crate::error::{GeostackError, Result};
    pub use crate::repository::Repository;
    pub use crate::shape::{count_body, documents_to_json};
    pub use crate::store::{DocumentStore, MemoryStore};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
