//! Strategy content accessor.

use std::sync::Arc;

use log::{error, info, warn};
use serde_json::{Value, json};

use crate::errors::{ForgeError, Result};
use crate::models::Strategy;
use crate::store::{ListQuery, RecordStore, StoreError};

const STRATEGIES_COLLECTION: &str = "strategies";

/// CRUD and query operations for the `strategies` collection.
pub struct StrategyService {
    store: Arc<dyn RecordStore>,
}

impl StrategyService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// All strategies, newest first.
    ///
    /// The ordered query may be rejected by a store without the matching
    /// index; in that case the full collection is fetched and sorted in
    /// memory. The fallback is first-class behavior, logged as a warning.
    pub async fn list_all(&self) -> Result<Vec<Strategy>> {
        let ordered = ListQuery::new().order_desc("createdAt");
        let docs = match self.store.list(STRATEGIES_COLLECTION, ordered).await {
            Ok(docs) => docs,
            Err(StoreError::QueryUnsupported(q)) => {
                warn!("Ordered strategy query unavailable ({q}), sorting in memory");
                let docs = self
                    .store
                    .list(STRATEGIES_COLLECTION, ListQuery::new())
                    .await
                    .map_err(|e| self.log_error("getting strategies", e))?;
                return Ok(sorted_newest_first(docs));
            }
            Err(e) => return Err(self.log_error("getting strategies", e)),
        };
        Ok(docs.iter().map(Strategy::from_document).collect())
    }

    /// One strategy by id; `NotFound` when no document matches.
    pub async fn get_by_id(&self, id: &str) -> Result<Strategy> {
        let doc = self
            .store
            .get(STRATEGIES_COLLECTION, id)
            .await
            .map_err(|e| match e {
                StoreError::NotFound { .. } => ForgeError::NotFound,
                other => self.log_error("getting strategy", other),
            })?;
        Ok(Strategy::from_document(&doc))
    }

    /// Strategies in one category, newest first.
    pub async fn list_by_category(&self, category: &str) -> Result<Vec<Strategy>> {
        let compound = ListQuery::new()
            .where_eq("category", json!(category))
            .order_desc("createdAt");
        let docs = match self.store.list(STRATEGIES_COLLECTION, compound).await {
            Ok(docs) => docs,
            Err(StoreError::QueryUnsupported(q)) => {
                warn!("Compound strategy query unavailable ({q}), sorting in memory");
                let docs = self
                    .store
                    .list(
                        STRATEGIES_COLLECTION,
                        ListQuery::new().where_eq("category", json!(category)),
                    )
                    .await
                    .map_err(|e| self.log_error("getting strategies by category", e))?;
                return Ok(sorted_newest_first(docs));
            }
            Err(e) => return Err(self.log_error("getting strategies by category", e)),
        };
        Ok(docs.iter().map(Strategy::from_document).collect())
    }

    /// Strategies submitted by one user, newest first.
    pub async fn list_by_user(&self, user_id: &str) -> Result<Vec<Strategy>> {
        let compound = ListQuery::new()
            .where_eq("userId", json!(user_id))
            .order_desc("createdAt");
        let docs = match self.store.list(STRATEGIES_COLLECTION, compound).await {
            Ok(docs) => docs,
            Err(StoreError::QueryUnsupported(q)) => {
                warn!("Compound strategy query unavailable ({q}), sorting in memory");
                let docs = self
                    .store
                    .list(
                        STRATEGIES_COLLECTION,
                        ListQuery::new().where_eq("userId", json!(user_id)),
                    )
                    .await
                    .map_err(|e| self.log_error("getting strategies by user", e))?;
                return Ok(sorted_newest_first(docs));
            }
            Err(e) => return Err(self.log_error("getting strategies by user", e)),
        };
        Ok(docs.iter().map(Strategy::from_document).collect())
    }

    /// Create a strategy. The payload gains `status: "active"` and the
    /// store's write timestamps; the merged record is returned.
    pub async fn create(&self, mut payload: Value) -> Result<Strategy> {
        if payload.is_object() {
            payload["status"] = json!("active");
        }
        let doc = self
            .store
            .create(STRATEGIES_COLLECTION, payload)
            .await
            .map_err(|e| self.log_error("creating strategy", e))?;
        info!("Created strategy {}", doc.id);
        Ok(Strategy::from_document(&doc))
    }

    /// Shallow-merge a partial payload; `updatedAt` is refreshed by the store.
    pub async fn update(&self, id: &str, patch: Value) -> Result<Strategy> {
        let doc = self
            .store
            .update(STRATEGIES_COLLECTION, id, patch)
            .await
            .map_err(|e| self.log_error("updating strategy", e))?;
        info!("Updated strategy {}", doc.id);
        Ok(Strategy::from_document(&doc))
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.store
            .delete(STRATEGIES_COLLECTION, id)
            .await
            .map_err(|e| self.log_error("deleting strategy", e))?;
        info!("Deleted strategy {}", id);
        Ok(())
    }

    fn log_error(&self, action: &str, e: StoreError) -> ForgeError {
        error!("Error {action}: {e}");
        ForgeError::Store(e)
    }
}

fn sorted_newest_first(docs: Vec<crate::store::Document>) -> Vec<Strategy> {
    let mut strategies: Vec<Strategy> = docs.iter().map(Strategy::from_document).collect();
    strategies.sort_by_key(|s| std::cmp::Reverse(s.created_sort_key()));
    strategies
}
