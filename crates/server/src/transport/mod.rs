//! Transport layer for the GeoStack server

pub mod http;
