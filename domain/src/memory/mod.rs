//! Vector memory domain
//!
//! Contracts and value objects for the phase-tagged memory store. The
//! [`VectorStore`] trait is implemented in the infrastructure layer; the
//! tiering policy lives in the application layer.

pub mod embedding;
pub mod metrics;
pub mod repository;
pub mod vector;

pub use embedding::{DEFAULT_EMBEDDING_DIMENSION, text_embedding};
pub use metrics::MetricsRegistry;
pub use repository::{StoreError, VectorStore};
pub use vector::{
    KIND_KEY, KIND_REASONING_RESULT, KIND_WORK_ITEM, MemoryVector, ScoredVector, StoreStats,
    euclidean_distance,
};
