//! JSON file backed vector store
//!
//! The whole collection lives in one JSON document:
//!
//! ```json
//! { "collection": "edrr", "dimension": 5, "records": [ { "id": "...", "embedding": [...], ... } ] }
//! ```
//!
//! Every successful write rewrites the document through a temporary file
//! and a rename, so a crash never leaves a half-written collection behind.

use super::collection::{Collection, CollectionFile};
use super::{METRICS_KIND, lock_poisoned};
use edrr_domain::{MemoryVector, MetricsRegistry, ScoredVector, StoreError, StoreStats, VectorStore};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use tracing::{debug, info, warn};

/// Durable vector store persisted as a single JSON file
pub struct JsonFileVectorStore {
    collection: RwLock<Collection>,
    name: String,
    path: PathBuf,
    metrics: Arc<MetricsRegistry>,
}

impl JsonFileVectorStore {
    /// Open (or create on first write) the collection stored at `path`.
    ///
    /// Existing records are loaded eagerly and re-validated against
    /// `dimension` when one is given.
    pub fn open(
        path: impl AsRef<Path>,
        name: impl Into<String>,
        dimension: Option<usize>,
        metrics: Arc<MetricsRegistry>,
    ) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let name = name.into();

        let collection = if path.exists() {
            let raw = fs::read_to_string(&path).map_err(|e| {
                StoreError::Backend(format!("Could not read {}: {}", path.display(), e))
            })?;
            let file: CollectionFile = serde_json::from_str(&raw)
                .map_err(|e| StoreError::Serialization(format!("{}: {}", path.display(), e)))?;
            if file.collection != name {
                warn!(
                    path = %path.display(),
                    found = file.collection.as_str(),
                    expected = name.as_str(),
                    "Collection name on disk differs, using configured name"
                );
            }
            let collection = Collection::from_file(name.clone(), dimension, file)?;
            info!(
                path = %path.display(),
                records = collection.len(),
                "Loaded vector collection"
            );
            collection
        } else {
            Collection::new(name.clone(), dimension)
        };

        Ok(Self {
            collection: RwLock::new(collection),
            name,
            path,
            metrics,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, collection: &Collection) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| {
                StoreError::Backend(format!("Could not create {}: {}", parent.display(), e))
            })?;
        }

        let body = serde_json::to_vec_pretty(&collection.to_file())
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        let mut tmp_name = self.path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp = PathBuf::from(tmp_name);

        fs::write(&tmp, body)
            .map_err(|e| StoreError::Backend(format!("Could not write {}: {}", tmp.display(), e)))?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            StoreError::Backend(format!("Could not replace {}: {}", self.path.display(), e))
        })?;
        debug!(path = %self.path.display(), records = collection.len(), "Persisted collection");
        Ok(())
    }

    /// Apply `op` to a copy of the collection and swap it in only once
    /// the copy is on disk.
    fn write_with<T>(
        &self,
        op: impl FnOnce(&mut Collection) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut guard = self.collection.write().map_err(lock_poisoned)?;
        let mut next = guard.clone();
        let out = op(&mut next)?;
        self.persist(&next)?;
        *guard = next;
        Ok(out)
    }
}

impl VectorStore for JsonFileVectorStore {
    fn collection(&self) -> &str {
        &self.name
    }

    fn store(&self, vector: MemoryVector) -> Result<String, StoreError> {
        self.metrics.increment(METRICS_KIND, "store");
        self.write_with(|c| c.insert(vector))
    }

    fn retrieve(&self, id: &str) -> Result<Option<MemoryVector>, StoreError> {
        self.metrics.increment(METRICS_KIND, "retrieve");
        Ok(self.collection.read().map_err(lock_poisoned)?.get(id))
    }

    fn similarity_search(&self, query: &[f32], k: usize) -> Result<Vec<ScoredVector>, StoreError> {
        self.metrics.increment(METRICS_KIND, "search");
        self.collection.read().map_err(lock_poisoned)?.search(query, k)
    }

    fn delete(&self, id: &str) -> Result<bool, StoreError> {
        self.metrics.increment(METRICS_KIND, "delete");
        if self.collection.read().map_err(lock_poisoned)?.get(id).is_none() {
            return Ok(false);
        }
        self.write_with(|c| Ok(c.remove(id)))
    }

    fn stats(&self) -> Result<StoreStats, StoreError> {
        let collection = self.collection.read().map_err(lock_poisoned)?;
        Ok(StoreStats {
            count: collection.len(),
            embedding_dimension: collection.dimension(),
            backing_location: self.path.display().to_string(),
        })
    }

    fn all(&self) -> Result<Vec<MemoryVector>, StoreError> {
        Ok(self.collection.read().map_err(lock_poisoned)?.all())
    }
}
