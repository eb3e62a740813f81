//! Collection bookkeeping shared by the vector store backends

use edrr_domain::{MemoryVector, ScoredVector, StoreError, euclidean_distance};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// A named set of vectors with a fixed embedding dimension
///
/// The dimension is fixed up front or by the first stored vector. Every
/// later write and query must match it exactly.
#[derive(Debug, Clone)]
pub(crate) struct Collection {
    name: String,
    dimension: Option<usize>,
    records: BTreeMap<String, MemoryVector>,
}

/// On-disk layout of a collection
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct CollectionFile {
    pub collection: String,
    #[serde(default)]
    pub dimension: Option<usize>,
    #[serde(default)]
    pub records: Vec<MemoryVector>,
}

impl Collection {
    pub fn new(name: impl Into<String>, dimension: Option<usize>) -> Self {
        Self {
            name: name.into(),
            dimension: dimension.filter(|d| *d > 0),
            records: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dimension(&self) -> Option<usize> {
        self.dimension
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    fn check_dimension(&self, actual: usize) -> Result<(), StoreError> {
        if actual == 0 {
            return Err(StoreError::EmptyEmbedding);
        }
        match self.dimension {
            Some(expected) if expected != actual => {
                Err(StoreError::DimensionMismatch { expected, actual })
            }
            _ => Ok(()),
        }
    }

    /// Insert or overwrite, assigning a UUID when the vector has no id.
    pub fn insert(&mut self, mut vector: MemoryVector) -> Result<String, StoreError> {
        self.check_dimension(vector.dimension())?;
        if self.dimension.is_none() {
            self.dimension = Some(vector.dimension());
        }

        let id = match vector.id.as_deref() {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => Uuid::new_v4().to_string(),
        };
        vector.id = Some(id.clone());
        self.records.insert(id.clone(), vector);
        Ok(id)
    }

    pub fn get(&self, id: &str) -> Option<MemoryVector> {
        self.records.get(id).cloned()
    }

    pub fn remove(&mut self, id: &str) -> bool {
        self.records.remove(id).is_some()
    }

    /// Brute-force nearest neighbours, ties broken by id.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<ScoredVector>, StoreError> {
        self.check_dimension(query.len())?;
        if k == 0 || self.records.is_empty() {
            return Ok(Vec::new());
        }

        let mut hits: Vec<ScoredVector> = self
            .records
            .values()
            .map(|v| ScoredVector {
                distance: euclidean_distance(query, &v.embedding),
                vector: v.clone(),
            })
            .collect();
        hits.sort_by(|a, b| {
            a.distance
                .total_cmp(&b.distance)
                .then_with(|| a.id().cmp(b.id()))
        });
        hits.truncate(k);
        Ok(hits)
    }

    pub fn all(&self) -> Vec<MemoryVector> {
        self.records.values().cloned().collect()
    }

    pub fn to_file(&self) -> CollectionFile {
        CollectionFile {
            collection: self.name.clone(),
            dimension: self.dimension,
            records: self.all(),
        }
    }

    /// Rebuild a collection from its file, re-validating every record.
    ///
    /// A configured `dimension` must agree with the one on disk.
    pub fn from_file(
        name: impl Into<String>,
        dimension: Option<usize>,
        file: CollectionFile,
    ) -> Result<Self, StoreError> {
        let mut collection = Self::new(name, dimension);
        if let Some(stored) = file.dimension {
            collection.check_dimension(stored)?;
            collection.dimension = Some(stored);
        }
        for record in file.records {
            collection.insert(record)?;
        }
        Ok(collection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_write_fixes_dimension() {
        let mut c = Collection::new("c", None);
        assert_eq!(c.dimension(), None);
        c.insert(MemoryVector::new(vec![1.0, 2.0, 3.0])).unwrap();
        assert_eq!(c.dimension(), Some(3));

        let err = c.insert(MemoryVector::new(vec![1.0])).unwrap_err();
        assert!(matches!(
            err,
            StoreError::DimensionMismatch {
                expected: 3,
                actual: 1
            }
        ));
    }

    #[test]
    fn test_empty_embedding_rejected() {
        let mut c = Collection::new("c", Some(2));
        assert!(matches!(
            c.insert(MemoryVector::new(vec![])),
            Err(StoreError::EmptyEmbedding)
        ));
        assert!(matches!(c.search(&[], 1), Err(StoreError::EmptyEmbedding)));
    }

    #[test]
    fn test_insert_assigns_and_keeps_ids() {
        let mut c = Collection::new("c", None);
        let generated = c.insert(MemoryVector::new(vec![1.0])).unwrap();
        assert!(Uuid::parse_str(&generated).is_ok());

        let kept = c.insert(MemoryVector::new(vec![2.0]).with_id("mine")).unwrap();
        assert_eq!(kept, "mine");
        c.insert(MemoryVector::new(vec![3.0]).with_id("mine")).unwrap();
        assert_eq!(c.len(), 2);
        assert_eq!(c.get("mine").unwrap().embedding, vec![3.0]);
    }

    #[test]
    fn test_search_breaks_ties_by_id() {
        let mut c = Collection::new("c", None);
        c.insert(MemoryVector::new(vec![1.0]).with_id("b")).unwrap();
        c.insert(MemoryVector::new(vec![-1.0]).with_id("a")).unwrap();
        c.insert(MemoryVector::new(vec![5.0]).with_id("c")).unwrap();

        let hits = c.search(&[0.0], 10).unwrap();
        let ids: Vec<&str> = hits.iter().map(|h| h.id()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert!(c.search(&[0.0], 0).unwrap().is_empty());
    }

    #[test]
    fn test_from_file_rejects_conflicting_dimension() {
        let file = CollectionFile {
            collection: "c".to_string(),
            dimension: Some(4),
            records: vec![],
        };
        assert!(matches!(
            Collection::from_file("c", Some(5), file),
            Err(StoreError::DimensionMismatch {
                expected: 5,
                actual: 4
            })
        ));
    }
}
