//! Typed read queries against the document collections.
//!
//! A [`Query`] is a conjunction of [`Predicate`]s plus an optional result
//! limit. It is backend neutral: [`MongoStore`](crate::store::MongoStore)
//! translates it into a filter document, [`MemoryStore`](crate::store::MemoryStore)
//! evaluates it directly.

mod builder;
mod filter;
pub mod parse;

pub use builder::QueryBuilder;
pub use filter::STRICT_WINDING_CRS;

use bson::DateTime;
use bson::oid::ObjectId;
use geostack_types::geo::Polygon;

/// One condition a document must satisfy.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// `_id` equals the identifier
    IdEquals(ObjectId),
    /// Reference field equals the parent identifier
    ReferenceEquals { field: &'static str, id: ObjectId },
    /// `after < field < before`, both bounds exclusive
    TimeBetween {
        field: &'static str,
        after: DateTime,
        before: DateTime,
    },
    /// GeoJSON point field lies within the polygon
    WithinPolygon {
        field: &'static str,
        polygon: Polygon,
    },
}

/// A conjunction of predicates with an optional cardinality limit.
///
/// Results are always returned in store order; a query never sorts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    predicates: Vec<Predicate>,
    limit: Option<u64>,
}

impl Query {
    /// Matches every document.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    /// Keep at most `limit` results. A limit of zero matches nothing.
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn max_results(&self) -> Option<u64> {
        self.limit
    }

    /// True when the query can be answered without touching the store.
    pub fn is_empty_by_limit(&self) -> bool {
        self.limit == Some(0)
    }

    /// The polygon predicate, if any, for index assisted lookups.
    pub fn polygon(&self) -> Option<(&'static str, &Polygon)> {
        self.predicates.iter().find_map(|p| match p {
            Predicate::WithinPolygon { field, polygon } => Some((*field, polygon)),
            _ => None,
        })
    }
}
