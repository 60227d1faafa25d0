//! Collection layout of the two document datasets.
//!
//! Both datasets share one shape: a parent collection (trackers, trails) and
//! a child collection of timestamped, geo-located records that reference
//! their parent by ObjectId.

/// Names of the collections and fields a dataset is queried through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dataset {
    /// Short name used in logs
    pub name: &'static str,
    pub parent_collection: &'static str,
    pub child_collection: &'static str,
    /// Child field holding the parent's ObjectId
    pub reference_field: &'static str,
    /// Child field holding the record timestamp
    pub time_field: &'static str,
    /// Child field holding the GeoJSON point (2dsphere indexed)
    pub geometry_field: &'static str,
    /// Fixed result cap of the by-parent listing
    pub children_cap: u64,
}

/// Crane telemetry: `tracker` documents and their `transmission`s.
pub const CRANE: Dataset = Dataset {
    name: "crane",
    parent_collection: "tracker",
    child_collection: "transmission",
    reference_field: "tracker",
    time_field: "timestamp",
    geometry_field: "geometry.coord",
    children_cap: 100,
};

/// GPS routes: `trail` documents and their `signal` trackpoints.
pub const TRAIL: Dataset = Dataset {
    name: "trail",
    parent_collection: "trail",
    child_collection: "signal",
    reference_field: "trail",
    time_field: "time",
    geometry_field: "geometry.coord",
    children_cap: 2000,
};
