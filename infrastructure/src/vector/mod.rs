//! Vector store backends
//!
//! Both backends implement [`VectorStore`](edrr_domain::VectorStore) on top
//! of the same in-process collection: brute-force Euclidean search, a
//! dimension fixed by configuration or the first write, and a metrics
//! counter per operation under the `vector_store` kind.

mod collection;
mod json_file_store;
mod memory_store;
mod tiers;

pub use json_file_store::JsonFileVectorStore;
pub use memory_store::InMemoryVectorStore;
pub use tiers::open_tiers;

use edrr_domain::StoreError;

/// Metrics kind recorded by every store operation
pub const METRICS_KIND: &str = "vector_store";

fn lock_poisoned<T>(_: std::sync::PoisonError<T>) -> StoreError {
    StoreError::Backend("collection lock poisoned".to_string())
}
