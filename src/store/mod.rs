//! Document store abstraction.
//!
//! Content lives in schema-less collections (`strategies`, `blog_posts`,
//! `waitlist`) of JSON documents addressed by a store-assigned id. The
//! [`RecordStore`] trait is the narrow seam the rest of the application
//! depends on, so handlers and services can be exercised against an
//! in-memory or temp-directory store in tests.
//!
//! A store may require ahead-of-time index provisioning for compound queries
//! (an equality filter combined with an ordering). Such a store rejects the
//! query with [`StoreError::QueryUnsupported`]; callers recover by issuing a
//! simpler query and filtering/sorting in memory. That fallback is a
//! first-class path, not an edge case.

pub mod json_store;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

pub use json_store::JsonStore;

/// A single document in a collection: the store-assigned id plus the raw
/// field bag.
#[derive(Debug, Clone)]
pub struct Document {
    pub id: String,
    pub data: Value,
}

impl Document {
    /// Field lookup on the underlying object; `None` for non-object data.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.data.get(name)
    }
}

/// Ordering directive for a list query.
#[derive(Debug, Clone)]
pub struct OrderBy {
    pub field: String,
    pub descending: bool,
}

/// Declarative list query: at most one equality filter and one ordering.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub filter: Option<(String, Value)>,
    pub order_by: Option<OrderBy>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn where_eq(mut self, field: &str, value: Value) -> Self {
        self.filter = Some((field.to_string(), value));
        self
    }

    pub fn order_desc(mut self, field: &str) -> Self {
        self.order_by = Some(OrderBy {
            field: field.to_string(),
            descending: true,
        });
        self
    }
}

/// Store operation errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No document matches the requested id
    #[error("document not found: {collection}/{id}")]
    NotFound { collection: String, id: String },

    /// Query shape needs an index the store does not have
    #[error("query requires a composite index: {0}")]
    QueryUnsupported(String),

    /// Underlying I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Document (de)serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Trait for document store backends.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// List documents in a collection, optionally filtered and ordered.
    async fn list(&self, collection: &str, query: ListQuery)
    -> Result<Vec<Document>, StoreError>;

    /// Fetch one document by id.
    async fn get(&self, collection: &str, id: &str) -> Result<Document, StoreError>;

    /// Create a document with a store-assigned id, stamping
    /// `createdAt`/`updatedAt` write timestamps. Returns the merged record.
    async fn create(&self, collection: &str, fields: Value) -> Result<Document, StoreError>;

    /// Shallow-merge a partial payload into an existing document and re-stamp
    /// `updatedAt`. Array and object fields are replaced wholesale, never
    /// deep-merged.
    async fn update(
        &self,
        collection: &str,
        id: &str,
        patch: Value,
    ) -> Result<Document, StoreError>;

    /// Delete a document. Deleting an absent document is not an error.
    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError>;

    /// Atomically add `delta` to a numeric counter field. A missing document
    /// is a no-op, matching counter semantics on detail pages that may race
    /// with a delete.
    async fn increment(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        delta: i64,
    ) -> Result<(), StoreError>;
}
