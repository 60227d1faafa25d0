use super::parse::{parse_amount, parse_date, parse_object_id, parse_ring};
use super::{Predicate, Query};
use crate::config::QueryLimits;
use crate::dataset::Dataset;
use crate::error::Result;

/// Turns raw request parameters into [`Query`] values for one dataset.
///
/// All parsing and validation happens here, before any store is consulted.
#[derive(Debug, Clone, Copy)]
pub struct QueryBuilder {
    dataset: Dataset,
    limits: QueryLimits,
}

impl QueryBuilder {
    pub fn new(dataset: Dataset, limits: QueryLimits) -> Self {
        Self { dataset, limits }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Every parent document.
    pub fn list_all(&self) -> Query {
        Query::all()
    }

    /// The parent document with the given `_id`.
    pub fn by_id(&self, raw_id: &str) -> Result<Query> {
        let id = parse_object_id(raw_id)?;
        Ok(Query::all().filter(Predicate::IdEquals(id)).limit(1))
    }

    /// Children of a parent, capped at the dataset's fixed listing size.
    pub fn by_parent(&self, raw_id: &str) -> Result<Query> {
        Ok(self
            .children_of(raw_id)?
            .limit(self.dataset.children_cap))
    }

    /// Every child document, for counting.
    pub fn count_all(&self) -> Query {
        Query::all()
    }

    /// The first `amount` children of a parent.
    pub fn by_parent_and_amount(&self, raw_id: &str, raw_amount: &str) -> Result<Query> {
        let query = self.children_of(raw_id)?;
        let amount = parse_amount(raw_amount, self.limits.max_amount)?;
        Ok(query.limit(amount))
    }

    /// Children of a parent strictly between two dates.
    ///
    /// An empty window (`d1 >= d2`) yields a query that matches nothing.
    pub fn by_date_range(&self, raw_id: &str, raw_from: &str, raw_to: &str) -> Result<Query> {
        let query = self.children_of(raw_id)?;
        let after = parse_date(raw_from)?;
        let before = parse_date(raw_to)?;

        let query = query.filter(Predicate::TimeBetween {
            field: self.dataset.time_field,
            after,
            before,
        });

        if after >= before {
            return Ok(query.limit(0));
        }
        Ok(query)
    }

    /// Children of a parent whose point lies inside the polygon.
    pub fn by_polygon(&self, raw_id: &str, raw_coords: &str) -> Result<Query> {
        let query = self.children_of(raw_id)?;
        let polygon = parse_ring(raw_coords, self.limits.max_polygon_vertices)?;
        Ok(query.filter(Predicate::WithinPolygon {
            field: self.dataset.geometry_field,
            polygon,
        }))
    }

    fn children_of(&self, raw_id: &str) -> Result<Query> {
        let id = parse_object_id(raw_id)?;
        Ok(Query::all().filter(Predicate::ReferenceEquals {
            field: self.dataset.reference_field,
            id,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{CRANE, TRAIL};
    use crate::error::GeostackError;

    const ID: &str = "5e2aec9e0bd1ad3f3ce7a1a4";

    fn crane() -> QueryBuilder {
        QueryBuilder::new(CRANE, QueryLimits::default())
    }

    #[test]
    fn test_by_id() {
        let query = crane().by_id(ID).unwrap();
        assert!(matches!(query.predicates(), [Predicate::IdEquals(_)]));
        assert_eq!(query.max_results(), Some(1));
    }

    #[test]
    fn test_by_parent_uses_dataset_cap() {
        assert_eq!(crane().by_parent(ID).unwrap().max_results(), Some(100));
        let trail = QueryBuilder::new(TRAIL, QueryLimits::default());
        let query = trail.by_parent(ID).unwrap();
        assert_eq!(query.max_results(), Some(2000));
        assert!(matches!(
            query.predicates(),
            [Predicate::ReferenceEquals { field: "trail", .. }]
        ));
    }

    #[test]
    fn test_count_all_is_unbounded() {
        let query = crane().count_all();
        assert!(query.predicates().is_empty());
        assert_eq!(query.max_results(), None);
    }

    #[test]
    fn test_by_parent_and_amount() {
        assert_eq!(
            crane().by_parent_and_amount(ID, "2").unwrap().max_results(),
            Some(2)
        );
        assert!(crane().by_parent_and_amount(ID, "0").unwrap().is_empty_by_limit());

        let err = crane().by_parent_and_amount(ID, "abc").unwrap_err();
        assert!(matches!(err, GeostackError::InvalidAmount(_)));

        let tight = QueryBuilder::new(
            CRANE,
            QueryLimits {
                max_amount: 10,
                ..QueryLimits::default()
            },
        );
        assert!(matches!(
            tight.by_parent_and_amount(ID, "11"),
            Err(GeostackError::AmountTooLarge { .. })
        ));
    }

    #[test]
    fn test_id_is_validated_before_other_params() {
        let err = crane().by_parent_and_amount("nope", "abc").unwrap_err();
        assert!(matches!(err, GeostackError::InvalidIdentifier(_)));
    }

    #[test]
    fn test_by_date_range() {
        let query = crane().by_date_range(ID, "2020-01-01", "2020-02-01").unwrap();
        assert!(!query.is_empty_by_limit());
        assert!(matches!(
            query.predicates()[1],
            Predicate::TimeBetween { field: "timestamp", .. }
        ));

        assert!(crane()
            .by_date_range(ID, "2020-02-01", "2020-01-01")
            .unwrap()
            .is_empty_by_limit());
        assert!(crane()
            .by_date_range(ID, "2020-01-01", "2020-01-01")
            .unwrap()
            .is_empty_by_limit());
        assert!(matches!(
            crane().by_date_range(ID, "2020-01-01", "soon"),
            Err(GeostackError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_by_polygon() {
        let query = crane().by_polygon(ID, "0,0,10,0,10,10,0,10,0,0").unwrap();
        let (field, polygon) = query.polygon().unwrap();
        assert_eq!(field, "geometry.coord");
        assert_eq!(polygon.ring_positions().len(), 5);

        assert!(matches!(
            crane().by_polygon(ID, "0,0,10"),
            Err(GeostackError::InvalidPolygon(_))
        ));
    }
}
