//! In-memory document store.
//!
//! Collections keep documents in insertion order, which is the store order
//! queries return. Positions of the configured geometry fields are indexed in
//! an R*-tree so polygon queries only test documents inside the polygon's
//! bounding box.
//!
//! Polygon membership ignores ring orientation and excludes points on the
//! boundary. MongoDB's strict-winding `$geoWithin` treats a clockwise ring as
//! its complement, so clockwise rings select opposite sets on the two
//! backends.

use super::DocumentStore;
use super::geo_index::GeoIndex;
use crate::dataset::Dataset;
use crate::error::{GeostackError, Result};
use crate::query::{Predicate, Query};
use async_trait::async_trait;
use bson::{Bson, Document};
use geostack_types::geo::Point;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::path::Path;

#[derive(Default)]
struct Collection {
    documents: Vec<Document>,
    indexes: FxHashMap<&'static str, GeoIndex>,
}

impl Collection {
    fn push(&mut self, document: Document) {
        let slot = self.documents.len();
        for (field, index) in self.indexes.iter_mut() {
            if let Some(point) = point_at(&document, field) {
                index.insert(point.lon(), point.lat(), slot);
            }
        }
        self.documents.push(document);
    }

    fn matching<'a>(&'a self, query: &'a Query) -> Box<dyn Iterator<Item = &'a Document> + 'a> {
        let indexed = query.polygon().and_then(|(field, polygon)| {
            let index = self.indexes.get(field)?;
            let rect = polygon.bounding_rect()?;
            Some(index.candidates(&rect))
        });

        match indexed {
            Some(slots) => Box::new(
                slots
                    .into_iter()
                    .map(move |slot| &self.documents[slot])
                    .filter(move |doc| matches(doc, query)),
            ),
            None => Box::new(self.documents.iter().filter(move |doc| matches(doc, query))),
        }
    }
}

/// Document store held entirely in memory.
pub struct MemoryStore {
    geo_fields: Vec<&'static str>,
    collections: RwLock<FxHashMap<String, Collection>>,
}

impl MemoryStore {
    /// Store without spatial indexes; polygon queries scan.
    pub fn new() -> Self {
        Self::with_geo_fields(Vec::new())
    }

    /// Store indexing the dataset's geometry field.
    pub fn for_dataset(dataset: &Dataset) -> Self {
        Self::with_geo_fields(vec![dataset.geometry_field])
    }

    fn with_geo_fields(geo_fields: Vec<&'static str>) -> Self {
        Self {
            geo_fields,
            collections: RwLock::new(FxHashMap::default()),
        }
    }

    /// Append a document to `collection`.
    pub fn insert(&self, collection: &str, document: Document) {
        let mut collections = self.collections.write();
        let entry = collections.entry(collection.to_string()).or_insert_with(|| Collection {
            documents: Vec::new(),
            indexes: self
                .geo_fields
                .iter()
                .map(|field| (*field, GeoIndex::default()))
                .collect(),
        });
        entry.push(document);
    }

    pub fn insert_many(&self, collection: &str, documents: impl IntoIterator<Item = Document>) {
        for document in documents {
            self.insert(collection, document);
        }
    }

    /// Number of documents in `collection`.
    pub fn document_count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .get(collection)
            .map_or(0, |c| c.documents.len())
    }

    /// Load collections from an extended JSON object mapping collection
    /// names to arrays of documents. Returns the number of documents loaded.
    ///
    /// ```
    /// use geostack::store::MemoryStore;
    ///
    /// let store = MemoryStore::new();
    /// let loaded = store
    ///     .load_extjson(r#"{"trail": [{"_id": {"$oid": "5e2aec9e0bd1ad3f3ce7a1a4"}, "name": "Pieterpad"}]}"#)
    ///     .unwrap();
    /// assert_eq!(loaded, 1);
    /// assert_eq!(store.document_count("trail"), 1);
    /// ```
    pub fn load_extjson(&self, json: &str) -> Result<usize> {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| GeostackError::Seed(e.to_string()))?;
        let serde_json::Value::Object(collections) = value else {
            return Err(GeostackError::Seed(
                "expected an object of collection arrays".to_string(),
            ));
        };

        let mut loaded = 0;
        for (name, documents) in collections {
            let serde_json::Value::Array(documents) = documents else {
                return Err(GeostackError::Seed(format!(
                    "collection '{name}' is not an array"
                )));
            };

            for document in documents {
                match Bson::try_from(document) {
                    Ok(Bson::Document(document)) => {
                        self.insert(&name, document);
                        loaded += 1;
                    }
                    Ok(other) => {
                        return Err(GeostackError::Seed(format!(
                            "collection '{name}' holds a non-document value: {other}"
                        )));
                    }
                    Err(e) => return Err(GeostackError::Seed(format!("{name}: {e}"))),
                }
            }
        }

        Ok(loaded)
    }

    /// Load an extended JSON seed file, see [`MemoryStore::load_extjson`].
    pub fn load_seed(&self, path: &Path) -> Result<usize> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| GeostackError::Seed(format!("{}: {e}", path.display())))?;
        self.load_extjson(&json)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find(&self, collection: &str, query: &Query) -> Result<Vec<Document>> {
        if query.is_empty_by_limit() {
            return Ok(Vec::new());
        }

        let collections = self.collections.read();
        let Some(collection) = collections.get(collection) else {
            return Ok(Vec::new());
        };

        let limit = query
            .max_results()
            .map_or(usize::MAX, |n| usize::try_from(n).unwrap_or(usize::MAX));
        Ok(collection.matching(query).take(limit).cloned().collect())
    }

    async fn count(&self, collection: &str, query: &Query) -> Result<u64> {
        let collections = self.collections.read();
        let Some(collection) = collections.get(collection) else {
            return Ok(0);
        };
        Ok(collection.matching(query).count() as u64)
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

fn matches(document: &Document, query: &Query) -> bool {
    query
        .predicates()
        .iter()
        .all(|predicate| predicate_matches(document, predicate))
}

fn predicate_matches(document: &Document, predicate: &Predicate) -> bool {
    match predicate {
        Predicate::IdEquals(id) => matches!(document.get("_id"), Some(Bson::ObjectId(v)) if v == id),
        Predicate::ReferenceEquals { field, id } => {
            matches!(resolve(document, field), Some(Bson::ObjectId(v)) if v == id)
        }
        Predicate::TimeBetween {
            field,
            after,
            before,
        } => matches!(resolve(document, field), Some(Bson::DateTime(t)) if after < t && t < before),
        Predicate::WithinPolygon { field, polygon } => {
            point_at(document, field).is_some_and(|point| polygon.contains(&point))
        }
    }
}

/// Follow a dotted path through embedded documents.
fn resolve<'a>(document: &'a Document, path: &str) -> Option<&'a Bson> {
    let mut parts = path.split('.');
    let mut value = document.get(parts.next()?)?;
    for part in parts {
        value = match value {
            Bson::Document(inner) => inner.get(part)?,
            _ => return None,
        };
    }
    Some(value)
}

/// A GeoJSON point or a legacy `[lon, lat]` pair at `path`.
fn point_at(document: &Document, path: &str) -> Option<Point> {
    let coordinates = match resolve(document, path)? {
        Bson::Document(geojson) => match geojson.get("coordinates")? {
            Bson::Array(pair) => pair,
            _ => return None,
        },
        Bson::Array(pair) => pair,
        _ => return None,
    };

    match coordinates.as_slice() {
        [lon, lat] => Some(Point::new(number(lon)?, number(lat)?)),
        _ => None,
    }
}

fn number(value: &Bson) -> Option<f64> {
    match value {
        Bson::Double(v) => Some(*v),
        Bson::Int32(v) => Some(f64::from(*v)),
        Bson::Int64(v) => Some(*v as f64),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::CRANE;
    use bson::oid::ObjectId;
    use bson::{DateTime, doc};
    use geostack_types::geo::Polygon;

    const DAY_MS: i64 = 86_400_000;

    fn transmission(tracker: ObjectId, day: i64, lon: f64, lat: f64) -> Document {
        doc! {
            "_id": ObjectId::new(),
            "timestamp": DateTime::from_millis(1_577_836_800_000 + day * DAY_MS),
            "geometry": { "coord": { "type": "Point", "coordinates": [lon, lat] }, "alt": 12.0 },
            "tracker": tracker,
        }
    }

    fn square() -> Polygon {
        Polygon::from_ring(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)])
    }

    fn store_with(tracker: ObjectId) -> MemoryStore {
        let store = MemoryStore::for_dataset(&CRANE);
        store.insert("transmission", transmission(tracker, 0, 5.0, 5.0));
        store.insert("transmission", transmission(tracker, 10, 20.0, 20.0));
        store.insert("transmission", transmission(ObjectId::new(), 12, 6.0, 6.0));
        store.insert("transmission", transmission(tracker, 31, 2.0, 3.0));
        store.insert("transmission", transmission(tracker, 40, 10.0, 5.0));
        store
    }

    fn for_tracker(tracker: ObjectId) -> Query {
        Query::all().filter(Predicate::ReferenceEquals {
            field: "tracker",
            id: tracker,
        })
    }

    #[tokio::test]
    async fn test_find_by_reference_keeps_insertion_order() {
        let tracker = ObjectId::new();
        let store = store_with(tracker);

        let found = store.find("transmission", &for_tracker(tracker)).await.unwrap();
        assert_eq!(found.len(), 4);
        let days: Vec<i64> = found
            .iter()
            .map(|d| (d.get_datetime("timestamp").unwrap().timestamp_millis() - 1_577_836_800_000) / DAY_MS)
            .collect();
        assert_eq!(days, vec![0, 10, 31, 40]);
    }

    #[tokio::test]
    async fn test_limit_and_count() {
        let tracker = ObjectId::new();
        let store = store_with(tracker);

        let found = store
            .find("transmission", &for_tracker(tracker).limit(2))
            .await
            .unwrap();
        assert_eq!(found.len(), 2);
        assert!(store
            .find("transmission", &for_tracker(tracker).limit(0))
            .await
            .unwrap()
            .is_empty());

        assert_eq!(store.count("transmission", &for_tracker(tracker).limit(1)).await.unwrap(), 4);
        assert_eq!(store.count("transmission", &Query::all()).await.unwrap(), 5);
        assert_eq!(store.count("missing", &Query::all()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_time_window_is_exclusive() {
        let tracker = ObjectId::new();
        let store = store_with(tracker);
        let query = for_tracker(tracker).filter(Predicate::TimeBetween {
            field: "timestamp",
            after: DateTime::from_millis(1_577_836_800_000),
            before: DateTime::from_millis(1_577_836_800_000 + 40 * DAY_MS),
        });

        let found = store.find("transmission", &query).await.unwrap();
        assert_eq!(found.len(), 2);
    }

    #[tokio::test]
    async fn test_polygon_query_indexed_and_scanned_agree() {
        let tracker = ObjectId::new();
        let indexed = store_with(tracker);
        let scanned = MemoryStore::new();
        for document in indexed.find("transmission", &Query::all()).await.unwrap() {
            scanned.insert("transmission", document);
        }

        let query = for_tracker(tracker).filter(Predicate::WithinPolygon {
            field: "geometry.coord",
            polygon: square(),
        });

        let a = indexed.find("transmission", &query).await.unwrap();
        let b = scanned.find("transmission", &query).await.unwrap();
        // (10, 5) sits on the boundary, (6, 6) belongs to another tracker
        assert_eq!(a.len(), 2);
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_polygon_orientation_is_ignored() {
        let tracker = ObjectId::new();
        let store = store_with(tracker);
        let clockwise =
            Polygon::from_ring(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0), (0.0, 0.0)]);

        let ccw = for_tracker(tracker).filter(Predicate::WithinPolygon {
            field: "geometry.coord",
            polygon: square(),
        });
        let cw = for_tracker(tracker).filter(Predicate::WithinPolygon {
            field: "geometry.coord",
            polygon: clockwise,
        });
        assert_eq!(
            store.find("transmission", &ccw).await.unwrap(),
            store.find("transmission", &cw).await.unwrap()
        );
    }

    #[test]
    fn test_document_count() {
        let tracker = ObjectId::new();
        let store = store_with(tracker);
        assert_eq!(store.document_count("transmission"), 5);
        assert_eq!(store.document_count("tracker"), 0);
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let store = MemoryStore::new();
        let id = ObjectId::new();
        store.insert("tracker", doc! { "_id": ObjectId::new(), "name": "Frida" });
        store.insert("tracker", doc! { "_id": id, "name": "Agnetha" });

        let found = store
            .find("tracker", &Query::all().filter(Predicate::IdEquals(id)))
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].get_str("name").unwrap(), "Agnetha");
    }

    #[test]
    fn test_point_at_formats() {
        let geojson = doc! { "geometry": { "coord": { "type": "Point", "coordinates": [1, 2.5] } } };
        assert_eq!(point_at(&geojson, "geometry.coord"), Some(Point::new(1.0, 2.5)));

        let legacy = doc! { "loc": [3_i64, 4.0] };
        assert_eq!(point_at(&legacy, "loc"), Some(Point::new(3.0, 4.0)));

        assert_eq!(point_at(&doc! { "loc": "here" }, "loc"), None);
        assert_eq!(point_at(&doc! { "loc": [1.0] }, "loc"), None);
        assert_eq!(point_at(&legacy, "geometry.coord"), None);
    }

    #[test]
    fn test_load_extjson_rejects_bad_shapes() {
        let store = MemoryStore::new();
        assert!(store.load_extjson("[]").is_err());
        assert!(store.load_extjson(r#"{"trail": {}}"#).is_err());
        assert!(store.load_extjson(r#"{"trail": [1]}"#).is_err());
        assert!(store.load_extjson("not json").is_err());
    }

    #[test]
    fn test_load_extjson_dates() {
        let store = MemoryStore::new();
        store
            .load_extjson(r#"{"signal": [{"time": {"$date": "2020-01-01T00:00:00Z"}}]}"#)
            .unwrap();
        let collections = store.collections.read();
        let signal = &collections["signal"].documents[0];
        assert_eq!(
            signal.get_datetime("time").unwrap().timestamp_millis(),
            1_577_836_800_000
        );
    }
}
