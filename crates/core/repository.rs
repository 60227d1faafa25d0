//! Dataset level read operations.
//!
//! A [`Repository`] pairs a [`QueryBuilder`] with the store holding the
//! dataset, so callers pass raw request parameters and get documents back.

use crate::config::QueryLimits;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::query::{Query, QueryBuilder};
use crate::store::DocumentStore;
use bson::Document;
use std::sync::Arc;

#[derive(Clone)]
pub struct Repository {
    builder: QueryBuilder,
    store: Arc<dyn DocumentStore>,
}

impl Repository {
    pub fn new(dataset: Dataset, limits: QueryLimits, store: Arc<dyn DocumentStore>) -> Self {
        Self {
            builder: QueryBuilder::new(dataset, limits),
            store,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        self.builder.dataset()
    }

    /// Every parent document.
    pub async fn parents(&self) -> Result<Vec<Document>> {
        self.find_parents(self.builder.list_all()).await
    }

    /// The parent with the given id, as a list of zero or one documents.
    pub async fn parent(&self, id: &str) -> Result<Vec<Document>> {
        self.find_parents(self.builder.by_id(id)?).await
    }

    /// Number of child documents across all parents.
    pub async fn count_children(&self) -> Result<u64> {
        let dataset = self.dataset();
        let count = self
            .store
            .count(dataset.child_collection, &self.builder.count_all())
            .await?;
        log::debug!("{}: {} {} documents", dataset.name, count, dataset.child_collection);
        Ok(count)
    }

    /// Children of a parent, up to the dataset's fixed cap.
    pub async fn children(&self, id: &str) -> Result<Vec<Document>> {
        self.find_children(self.builder.by_parent(id)?).await
    }

    pub async fn children_by_amount(&self, id: &str, amount: &str) -> Result<Vec<Document>> {
        self.find_children(self.builder.by_parent_and_amount(id, amount)?)
            .await
    }

    /// Children recorded strictly between two `YYYY-MM-DD` dates.
    pub async fn children_between(&self, id: &str, from: &str, to: &str) -> Result<Vec<Document>> {
        self.find_children(self.builder.by_date_range(id, from, to)?)
            .await
    }

    /// Children located inside a closed `lon,lat,...` ring.
    pub async fn children_within(&self, id: &str, coords: &str) -> Result<Vec<Document>> {
        self.find_children(self.builder.by_polygon(id, coords)?)
            .await
    }

    async fn find_parents(&self, query: Query) -> Result<Vec<Document>> {
        self.find(self.dataset().parent_collection, query).await
    }

    async fn find_children(&self, query: Query) -> Result<Vec<Document>> {
        self.find(self.dataset().child_collection, query).await
    }

    async fn find(&self, collection: &'static str, query: Query) -> Result<Vec<Document>> {
        let documents = self.store.find(collection, &query).await?;
        log::debug!(
            "{}: {} {} documents for {} predicates ({})",
            self.dataset().name,
            documents.len(),
            collection,
            query.predicates().len(),
            self.store.backend_name()
        );
        Ok(documents)
    }
}
