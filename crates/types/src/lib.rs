//! # geostack-types
//!
//! Data model for the GeoStack datasets.
//!
//! - **Crane telemetry**: [`Tracker`](crane::Tracker), [`Transmission`](crane::Transmission)
//! - **GPS routes**: [`Trail`](trail::Trail), [`Signal`](trail::Signal)
//! - **World Port Index**: [`Port`](port::Port)
//! - **Geometry**: [`Point`](geo::Point), [`Polygon`](geo::Polygon) and the
//!   stored [`GeoJsonPoint`](geo::GeoJsonPoint)
//!
//! Document types serialize with the field names the import pipeline writes,
//! so `bson::to_document` / `bson::from_document` round-trip stored records.
//!
//! ## Examples
//!
//! ```rust
//! use geostack_types::geo::{Point, Polygon};
//!
//! let ring = Polygon::from_ring(&[
//!     (5.0, 52.0),
//!     (6.0, 52.0),
//!     (6.0, 53.0),
//!     (5.0, 53.0),
//!     (5.0, 52.0),
//! ]);
//! assert!(ring.contains(&Point::new(5.5, 52.5)));
//! ```

pub mod crane;
pub mod geo;
pub mod port;
pub mod trail;

pub use bson::DateTime;
pub use bson::oid::ObjectId;
