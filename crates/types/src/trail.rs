//! GPS route documents: one [`Trail`] per recorded route, many [`Signal`]
//! trackpoints per trail.

use crate::geo::Geometry;
use bson::DateTime;
use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trail {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    #[serde(rename = "abr")]
    pub abbreviation: String,
    #[serde(rename = "s_date")]
    pub start_date: DateTime,
    #[serde(rename = "e_date")]
    pub end_date: DateTime,
    /// Biking, hiking, driving...
    #[serde(rename = "r_type")]
    pub route_type: String,
    #[serde(rename = "t_points")]
    pub point_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub time: DateTime,
    pub geometry: Geometry,
    pub trail: ObjectId,
}
