//! Process-local vector store

use super::collection::Collection;
use super::{METRICS_KIND, lock_poisoned};
use edrr_domain::{MemoryVector, MetricsRegistry, ScoredVector, StoreError, StoreStats, VectorStore};
use std::sync::{Arc, RwLock};
use tracing::debug;

/// Vector store held entirely in memory
///
/// Writes take the collection's write lock; reads share the read lock.
pub struct InMemoryVectorStore {
    collection: RwLock<Collection>,
    name: String,
    metrics: Arc<MetricsRegistry>,
}

impl InMemoryVectorStore {
    pub fn new(name: impl Into<String>, metrics: Arc<MetricsRegistry>) -> Self {
        let name = name.into();
        Self {
            collection: RwLock::new(Collection::new(name.clone(), None)),
            name,
            metrics,
        }
    }

    /// Fix the embedding dimension before the first write
    pub fn with_dimension(self, dimension: usize) -> Self {
        Self {
            collection: RwLock::new(Collection::new(self.name.clone(), Some(dimension))),
            ..self
        }
    }
}

impl VectorStore for InMemoryVectorStore {
    fn collection(&self) -> &str {
        &self.name
    }

    fn store(&self, vector: MemoryVector) -> Result<String, StoreError> {
        self.metrics.increment(METRICS_KIND, "store");
        let id = self
            .collection
            .write()
            .map_err(lock_poisoned)?
            .insert(vector)?;
        debug!(collection = self.name.as_str(), id = id.as_str(), "Stored vector");
        Ok(id)
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
        Ok(self.collection.write().map_err(lock_poisoned)?.remove(id))
    }

    fn stats(&self) -> Result<StoreStats, StoreError> {
        let collection = self.collection.read().map_err(lock_poisoned)?;
        Ok(StoreStats {
            count: collection.len(),
            embedding_dimension: collection.dimension(),
            backing_location: "memory".to_string(),
        })
    }

    fn all(&self) -> Result<Vec<MemoryVector>, StoreError> {
        Ok(self.collection.read().map_err(lock_poisoned)?.all())
    }
}
