//! Crane telemetry documents: one [`Tracker`] per tagged bird, many
//! [`Transmission`]s per tracker.

use crate::geo::Geometry;
use bson::DateTime;
use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A tagged crane and the study it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tracker {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub study_name: String,
    /// Latin name of the species.
    pub individual_taxon_canonical_name: String,
    pub individual_local_identifier: i64,
    pub start_date: DateTime,
    pub end_date: DateTime,
    pub name: String,
    #[serde(rename = "transmission_Count")]
    pub transmission_count: i64,
}

/// Ground speed in m/s and heading in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Speed {
    pub ground_speed: f64,
    pub heading: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransmissionMetadata {
    pub visible: bool,
    pub sensor_type: String,
    pub tag_voltage: f64,
}

/// A single telemetry event sent by a tracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transmission {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub event_id: i64,
    pub timestamp: DateTime,
    pub geometry: Geometry,
    pub speed: Speed,
    pub metadata: TransmissionMetadata,
    /// Owning tracker.
    pub tracker: ObjectId,
}
