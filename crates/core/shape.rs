//! Conversion of query results into response bodies.
//!
//! Documents are rendered as relaxed extended JSON: ObjectIds become
//! `{"$oid": ...}`, dates become `{"$date": ...}` and plain numbers stay
//! plain. Field order is kept as stored.

use bson::{Bson, Document};
use serde_json::Value;

pub fn document_to_json(document: Document) -> Value {
    Bson::Document(document).into_relaxed_extjson()
}

/// A JSON array of documents in the order given.
pub fn documents_to_json(documents: Vec<Document>) -> Value {
    Value::Array(documents.into_iter().map(document_to_json).collect())
}

/// Counts are sent as a bare decimal string.
pub fn count_body(count: u64) -> String {
    count.to_string()
}

/// `[[n]]`, the row/column shape of the port count.
pub fn ports_count_body(count: i64) -> Value {
    serde_json::json!([[count]])
}
