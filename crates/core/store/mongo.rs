use super::DocumentStore;
use crate::error::{GeostackError, Result};
use crate::query::Query;
use async_trait::async_trait;
use bson::Document;
use futures::TryStreamExt;
use mongodb::options::{CountOptions, FindOptions};
use mongodb::{Client, Database};

/// MongoDB backed store. The database is the one named in the connection
/// string's path.
pub struct MongoStore {
    database: Database,
}

impl MongoStore {
    /// Parse the connection string and select its default database.
    ///
    /// The driver connects lazily, so an unreachable server surfaces on the
    /// first query rather than here.
    pub async fn connect(uri: &str) -> Result<Self> {
        let client = Client::with_uri_str(uri).await?;
        let database = client.default_database().ok_or_else(|| {
            GeostackError::Config(format!("connection string '{uri}' names no database"))
        })?;
        Ok(Self { database })
    }

    pub fn from_database(database: Database) -> Self {
        Self { database }
    }

    pub fn database_name(&self) -> &str {
        self.database.name()
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn find(&self, collection: &str, query: &Query) -> Result<Vec<Document>> {
        if query.is_empty_by_limit() {
            return Ok(Vec::new());
        }

        let options = FindOptions::builder()
            .limit(query.max_results().map(|n| i64::try_from(n).unwrap_or(i64::MAX)))
            .build();

        let cursor = self
            .database
            .collection::<Document>(collection)
            .find(query.to_filter(), options)
            .await?;

        Ok(cursor.try_collect().await?)
    }

    async fn count(&self, collection: &str, query: &Query) -> Result<u64> {
        let count = self
            .database
            .collection::<Document>(collection)
            .count_documents(query.to_filter(), CountOptions::default())
            .await?;
        Ok(count)
    }

    fn backend_name(&self) -> &'static str {
        "mongodb"
    }
}
