//! File-backed document store.
//!
//! Each collection is a directory under the data root; each document is one
//! `<id>.json` file holding the field bag. Ids are assigned by the store.
//!
//! Query support mirrors a managed document store without provisioned
//! composite indexes: a single equality filter or a single ordering is
//! served, but a filter combined with an ordering is rejected with
//! [`StoreError::QueryUnsupported`] and left to the caller's in-memory
//! fallback.

use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use log::{debug, warn};
use serde_json::{Map, Value, json};
use sha2::{Digest, Sha256};

use crate::store::{Document, ListQuery, RecordStore, StoreError};
use crate::utils::dates;

pub struct JsonStore {
    root: PathBuf,
    /// Serializes writes so read-modify-write operations (update, increment)
    /// cannot interleave.
    write_lock: Mutex<()>,
    id_counter: AtomicU64,
}

impl JsonStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        debug!("Opening JSON store at {:?}", root);
        Self {
            root,
            write_lock: Mutex::new(()),
            id_counter: AtomicU64::new(0),
        }
    }

    fn collection_dir(&self, collection: &str) -> PathBuf {
        self.root.join(collection)
    }

    fn doc_path(&self, collection: &str, id: &str) -> PathBuf {
        self.collection_dir(collection).join(format!("{id}.json"))
    }

    /// Opaque, collision-resistant document id.
    fn generate_id(&self, collection: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        let count = self.id_counter.fetch_add(1, AtomicOrdering::Relaxed);
        let digest = Sha256::digest(format!("{collection}:{nanos}:{count}"));
        hex::encode(digest)[..20].to_string()
    }

    fn read_document(&self, collection: &str, path: &Path) -> Option<Document> {
        let id = path.file_stem()?.to_str()?.to_string();
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Failed to read document {:?}: {}", path, e);
                return None;
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(data) => Some(Document { id, data }),
            Err(e) => {
                warn!("Skipping malformed document {}/{}: {}", collection, id, e);
                None
            }
        }
    }

    fn write_document(&self, collection: &str, id: &str, data: &Value) -> Result<(), StoreError> {
        fs::create_dir_all(self.collection_dir(collection))?;
        let bytes = serde_json::to_vec_pretty(data)?;
        fs::write(self.doc_path(collection, id), bytes)?;
        Ok(())
    }

    fn load_collection(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let dir = self.collection_dir(collection);
        if !dir.is_dir() {
            return Ok(Vec::new());
        }
        let mut docs = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Failed to read store entry in {:?}: {}", dir, e);
                    continue;
                }
            };
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(doc) = self.read_document(collection, &path) {
                docs.push(doc);
            }
        }
        Ok(docs)
    }
}

/// Compare two optional field values for ordering: numbers numerically,
/// strings lexicographically, anything else (and absent fields) first.
fn compare_field(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        _ => Ordering::Equal,
    }
}

#[async_trait]
impl RecordStore for JsonStore {
    async fn list(
        &self,
        collection: &str,
        query: ListQuery,
    ) -> Result<Vec<Document>, StoreError> {
        if let (Some((field, _)), Some(order)) = (&query.filter, &query.order_by) {
            return Err(StoreError::QueryUnsupported(format!(
                "{collection} filtered by '{field}' ordered by '{}'",
                order.field
            )));
        }

        let mut docs = self.load_collection(collection)?;

        if let Some((field, expected)) = &query.filter {
            docs.retain(|doc| doc.field(field) == Some(expected));
        }

        if let Some(order) = &query.order_by {
            docs.sort_by(|a, b| {
                let cmp = compare_field(a.field(&order.field), b.field(&order.field));
                if order.descending { cmp.reverse() } else { cmp }
            });
        }

        debug!("Listed {}: {} documents", collection, docs.len());
        Ok(docs)
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Document, StoreError> {
        let path = self.doc_path(collection, id);
        if !path.is_file() {
            return Err(StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            });
        }
        self.read_document(collection, &path)
            .ok_or_else(|| StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            })
    }

    async fn create(&self, collection: &str, fields: Value) -> Result<Document, StoreError> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());

        let mut data = match fields {
            Value::Object(map) => Value::Object(map),
            _ => Value::Object(Map::new()),
        };
        let now = dates::now_rfc3339();
        data["createdAt"] = Value::String(now.clone());
        data["updatedAt"] = Value::String(now);

        let id = self.generate_id(collection);
        self.write_document(collection, &id, &data)?;
        debug!("Created {}/{}", collection, id);
        Ok(Document { id, data })
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        patch: Value,
    ) -> Result<Document, StoreError> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());

        let path = self.doc_path(collection, id);
        let not_found = || StoreError::NotFound {
            collection: collection.to_string(),
            id: id.to_string(),
        };
        if !path.is_file() {
            return Err(not_found());
        }
        let mut doc = self
            .read_document(collection, &path)
            .ok_or_else(not_found)?;
        if let (Value::Object(target), Value::Object(fields)) = (&mut doc.data, patch) {
            for (key, value) in fields {
                target.insert(key, value);
            }
        }
        doc.data["updatedAt"] = json!(dates::now_rfc3339());
        self.write_document(collection, id, &doc.data)?;
        debug!("Updated {}/{}", collection, id);
        Ok(doc)
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());

        match fs::remove_file(self.doc_path(collection, id)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    async fn increment(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        delta: i64,
    ) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());

        let path = self.doc_path(collection, id);
        if !path.is_file() {
            return Ok(());
        }
        let mut doc = match self.read_document(collection, &path) {
            Some(doc) => doc,
            None => return Ok(()),
        };
        let current = doc
            .field(field)
            .and_then(Value::as_f64)
            .map(|n| n as i64)
            .unwrap_or(0);
        doc.data[field] = json!(current + delta);
        self.write_document(collection, id, &doc.data)?;
        Ok(())
    }
}
