//! Translation of [`Query`] into MongoDB filter documents.

use super::{Predicate, Query};
use bson::{Bson, Document, doc};
use geostack_types::geo::Polygon;

/// Custom CRS that makes `$geoWithin` honour the ring's winding order.
///
/// With it, a ring is interpreted as the area to the left of its edges
/// instead of the smaller of the two areas it separates.
pub const STRICT_WINDING_CRS: &str = "urn:x-mongodb:crs:strictwinding:EPSG:4326";

impl Predicate {
    fn append_to(&self, filter: &mut Document) {
        match self {
            Predicate::IdEquals(id) => {
                filter.insert("_id", *id);
            }
            Predicate::ReferenceEquals { field, id } => {
                filter.insert(*field, *id);
            }
            Predicate::TimeBetween {
                field,
                after,
                before,
            } => {
                filter.insert(*field, doc! { "$gt": *after, "$lt": *before });
            }
            Predicate::WithinPolygon { field, polygon } => {
                filter.insert(*field, doc! { "$geoWithin": { "$geometry": geometry(polygon) } });
            }
        }
    }
}

fn geometry(polygon: &Polygon) -> Document {
    let ring: Vec<Bson> = polygon
        .ring_positions()
        .into_iter()
        .map(|[lon, lat]| Bson::Array(vec![Bson::Double(lon), Bson::Double(lat)]))
        .collect();

    doc! {
        "type": "Polygon",
        "coordinates": [Bson::Array(ring)],
        "crs": {
            "type": "name",
            "properties": { "name": STRICT_WINDING_CRS },
        },
    }
}

impl Query {
    /// Build the filter document. The limit is not part of the filter and is
    /// applied through find options.
    pub fn to_filter(&self) -> Document {
        let mut filter = Document::new();
        for predicate in &self.predicates {
            predicate.append_to(&mut filter);
        }
        filter
    }
}
