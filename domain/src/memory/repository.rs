//! Vector store repository trait

use super::vector::{MemoryVector, ScoredVector, StoreStats};
use thiserror::Error;

/// Errors raised by vector store operations
///
/// Not-found is never an error: lookups return `Option`, deletes `bool`.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Embedding dimension mismatch: collection expects {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Embedding is empty")]
    EmptyEmbedding,

    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// A named, fixed-dimension collection of embedding vectors
///
/// Implementations live in the infrastructure layer and are chosen at
/// construction time. Calls are synchronous and bounded by data size.
/// Writes are serialized per collection, reads may run concurrently.
pub trait VectorStore: Send + Sync {
    /// Name of the collection
    fn collection(&self) -> &str;

    /// Insert or overwrite a vector, returning its id.
    ///
    /// A UUID is assigned when `vector.id` is `None`.
    fn store(&self, vector: MemoryVector) -> Result<String, StoreError>;

    /// Fetch a vector by id; `None` when absent
    fn retrieve(&self, id: &str) -> Result<Option<MemoryVector>, StoreError>;

    /// Up to `k` nearest vectors by Euclidean distance, closest first
    fn similarity_search(&self, query: &[f32], k: usize) -> Result<Vec<ScoredVector>, StoreError>;

    /// Remove a vector; `true` iff it existed
    fn delete(&self, id: &str) -> Result<bool, StoreError>;

    fn stats(&self) -> Result<StoreStats, StoreError>;

    /// Every stored vector, in id order
    fn all(&self) -> Result<Vec<MemoryVector>, StoreError>;
}
