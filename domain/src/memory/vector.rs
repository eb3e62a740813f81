//! Memory vector value objects

use crate::edrr::EdrrPhase;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Metadata key holding the record kind
pub const KIND_KEY: &str = "kind";
/// Kind of records written for reasoning results
pub const KIND_REASONING_RESULT: &str = "reasoning_result";
/// Kind of records written for flushed coordinator work
pub const KIND_WORK_ITEM: &str = "work_item";

/// An embedding plus its payload, as persisted by a [`VectorStore`]
///
/// [`VectorStore`]: super::VectorStore
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryVector {
    /// Assigned by the store when absent
    #[serde(default)]
    pub id: Option<String>,
    pub embedding: Vec<f32>,
    #[serde(default)]
    pub payload: serde_json::Value,
    #[serde(default)]
    pub phase: Option<EdrrPhase>,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl MemoryVector {
    pub fn new(embedding: Vec<f32>) -> Self {
        Self {
            id: None,
            embedding,
            payload: serde_json::Value::Null,
            phase: None,
            metadata: BTreeMap::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }

    pub fn with_phase(mut self, phase: EdrrPhase) -> Self {
        self.phase = Some(phase);
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn kind(&self) -> Option<&str> {
        self.metadata.get(KIND_KEY).map(String::as_str)
    }

    pub fn dimension(&self) -> usize {
        self.embedding.len()
    }
}

/// A search hit and its distance from the query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredVector {
    pub vector: MemoryVector,
    pub distance: f32,
}

impl ScoredVector {
    pub fn id(&self) -> &str {
        self.vector.id.as_deref().unwrap_or_default()
    }
}

/// Collection statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStats {
    pub count: usize,
    /// `None` until the dimension is fixed by config or a first write
    pub embedding_dimension: Option<usize>,
    /// Where the collection lives ("memory" or a file path)
    pub backing_location: String,
}

/// Euclidean distance between two embeddings of equal length
pub fn euclidean_distance(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f32>()
        .sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        assert_eq!(euclidean_distance(&[0.0, 0.0], &[3.0, 4.0]), 5.0);
        assert_eq!(euclidean_distance(&[1.5, -2.0], &[1.5, -2.0]), 0.0);
    }

    #[test]
    fn test_builder_and_kind() {
        let v = MemoryVector::new(vec![1.0, 2.0])
            .with_id("v-1")
            .with_phase(EdrrPhase::Refine)
            .with_metadata(KIND_KEY, KIND_WORK_ITEM);
        assert_eq!(v.kind(), Some(KIND_WORK_ITEM));
        assert_eq!(v.dimension(), 2);
        assert_eq!(v.id.as_deref(), Some("v-1"));
    }

    #[test]
    fn test_record_layout() {
        let v = MemoryVector::new(vec![0.5])
            .with_id("x")
            .with_phase(EdrrPhase::Expand)
            .with_payload(serde_json::json!({"k": 1}));
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json["id"], "x");
        assert_eq!(json["phase"], "EXPAND");
        assert_eq!(json["payload"]["k"], 1);
    }
}
