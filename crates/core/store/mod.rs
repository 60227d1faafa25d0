//! Document store abstraction.
//!
//! Repositories talk to a [`DocumentStore`] and never to a concrete backend,
//! so the same query code runs against MongoDB in production and against the
//! in-memory store in tests and demos.

use crate::config::{StoreBackend, StoreConfig};
use crate::dataset::Dataset;
use crate::error::Result;
use crate::query::Query;
use async_trait::async_trait;
use bson::Document;
use std::sync::Arc;

mod geo_index;
mod memory;
#[cfg(feature = "mongodb")]
mod mongo;

pub use memory::MemoryStore;
#[cfg(feature = "mongodb")]
pub use mongo::MongoStore;

/// Read access to named collections of BSON documents.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Documents of `collection` matching `query`, in store order, truncated
    /// to the query limit.
    async fn find(&self, collection: &str, query: &Query) -> Result<Vec<Document>>;

    /// Number of documents of `collection` matching `query`. The query limit
    /// is ignored.
    async fn count(&self, collection: &str, query: &Query) -> Result<u64>;

    /// Backend name for logs.
    fn backend_name(&self) -> &'static str;
}

/// Open the store configured for `dataset`.
pub async fn open_store(config: &StoreConfig, dataset: &Dataset) -> Result<Arc<dyn DocumentStore>> {
    match config.backend {
        StoreBackend::Memory => {
            let store = MemoryStore::for_dataset(dataset);
            if let Some(seed) = &config.seed {
                let loaded = store.load_seed(seed)?;
                log::info!(
                    "{}: loaded {} seed documents from {}",
                    dataset.name,
                    loaded,
                    seed.display()
                );
            }
            Ok(Arc::new(store))
        }
        #[cfg(feature = "mongodb")]
        StoreBackend::Mongodb => {
            let store = MongoStore::connect(&config.uri).await?;
            log::info!("{}: using MongoDB database '{}'", dataset.name, store.database_name());
            Ok(Arc::new(store))
        }
        #[cfg(not(feature = "mongodb"))]
        StoreBackend::Mongodb => Err(crate::error::GeostackError::Config(format!(
            "{}: the mongodb backend is not compiled in",
            dataset.name
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::CRANE;
    use std::io::Write;

    #[tokio::test]
    async fn test_open_memory_store_with_seed() {
        let mut seed = tempfile::NamedTempFile::new().unwrap();
        write!(
            seed,
            r#"{{"tracker": [{{"_id": {{"$oid": "5e2aec9e0bd1ad3f3ce7a1a4"}}, "name": "Agnetha"}}]}}"#
        )
        .unwrap();

        let config = StoreConfig::memory().with_seed(seed.path());
        let store = open_store(&config, &CRANE).await.unwrap();
        assert_eq!(store.backend_name(), "memory");
        assert_eq!(store.count("tracker", &Query::all()).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_open_memory_store_missing_seed() {
        let config = StoreConfig::memory().with_seed("/nonexistent/seed.json");
        assert!(open_store(&config, &CRANE).await.is_err());
    }
}
