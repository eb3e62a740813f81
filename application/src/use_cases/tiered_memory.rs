//! Tiered memory use case
//!
//! One logical store over an ordered list of [`VectorStore`] tiers:
//!
//! ```text
//! record / store_vector ──▶ tier 0 ──▶ every write-through tier
//! retrieve ──▶ tier 0 ──miss──▶ tier 1 ──miss──▶ ... ──▶ None
//!                 ▲                │ hit
//!                 └── promote ─────┘
//! query ──▶ every tier, merged by distance, shallowest copy wins
//! ```

use crate::config::MemoryParams;
use crate::ports::work_sink::WorkSink;
use edrr_domain::memory::{KIND_KEY, KIND_REASONING_RESULT, KIND_WORK_ITEM};
use edrr_domain::{
    EdrrPhase, MemoryVector, MetricsRegistry, ReasoningResult, StoreError, VectorStore, WorkItem,
    text_embedding,
};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;
use tracing::{debug, info};

const METRICS_KIND: &str = "memory";

/// Errors that can occur in the tiered memory
#[derive(Error, Debug)]
pub enum MemoryError {
    #[error("No memory tiers configured")]
    NoTiers,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Result was attempted in {attempted}, not {requested}")]
    PhaseMismatch {
        requested: EdrrPhase,
        attempted: EdrrPhase,
    },
}

/// One named layer of the memory
///
/// A write-through tier below the first receives a copy of every write,
/// under the id assigned by the first tier.
pub struct MemoryTier {
    name: String,
    store: Arc<dyn VectorStore>,
    write_through: bool,
}

impl MemoryTier {
    pub fn new(name: impl Into<String>, store: Arc<dyn VectorStore>) -> Self {
        Self {
            name: name.into(),
            store,
            write_through: false,
        }
    }

    pub fn with_write_through(mut self, write_through: bool) -> Self {
        self.write_through = write_through;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_write_through(&self) -> bool {
        self.write_through
    }

    pub fn store(&self) -> &Arc<dyn VectorStore> {
        &self.store
    }
}

/// Cumulative lookup statistics for one tier
///
/// Observational only; nothing in the memory depends on these numbers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierStats {
    pub name: String,
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f64,
}

#[derive(Debug, Default, Clone, Copy)]
struct TierCounters {
    hits: u64,
    misses: u64,
}

/// Phase-tagged memory over ordered vector store tiers
pub struct TieredMemoryManager {
    tiers: Vec<MemoryTier>,
    params: MemoryParams,
    metrics: Arc<MetricsRegistry>,
    pending: Mutex<Vec<WorkItem>>,
    counters: Mutex<Vec<TierCounters>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl TieredMemoryManager {
    pub fn new(
        tiers: Vec<MemoryTier>,
        params: MemoryParams,
        metrics: Arc<MetricsRegistry>,
    ) -> Result<Self, MemoryError> {
        if tiers.is_empty() {
            return Err(MemoryError::NoTiers);
        }

        let counters = vec![TierCounters::default(); tiers.len()];
        Ok(Self {
            tiers,
            params,
            metrics,
            pending: Mutex::new(Vec::new()),
            counters: Mutex::new(counters),
        })
    }

    fn first_tier(&self) -> &MemoryTier {
        // Non-empty by construction.
        &self.tiers[0]
    }

    pub fn tiers(&self) -> &[MemoryTier] {
        &self.tiers
    }

    pub fn metrics(&self) -> &Arc<MetricsRegistry> {
        &self.metrics
    }

    /// Persist a reasoning result and return its record id.
    ///
    /// The record is tagged `phase`, or RETROSPECT when consensus failed.
    /// Failed results are persisted like any other. `phase` must be the
    /// phase the result was attempted in.
    pub fn record(&self, phase: EdrrPhase, result: &ReasoningResult) -> Result<String, MemoryError> {
        if result.attempted_in() != phase {
            return Err(MemoryError::PhaseMismatch {
                requested: phase,
                attempted: result.attempted_in(),
            });
        }
        let tag = result.phase();

        let payload =
            serde_json::to_value(result).map_err(|e| MemoryError::Serialization(e.to_string()))?;
        let embedding = text_embedding(&result.embedding_text(), self.params.dimension);

        let vector = MemoryVector::new(embedding)
            .with_payload(payload)
            .with_phase(tag)
            .with_metadata(KIND_KEY, KIND_REASONING_RESULT)
            .with_metadata("change_id", result.change_id())
            .with_metadata("attempted_in", result.attempted_in().as_str())
            .with_metadata("consensus", result.consensus_reached().to_string());

        let id = self.write(vector)?;
        self.metrics.increment(METRICS_KIND, "record");

        info!(
            record_id = %id,
            change_id = result.change_id(),
            phase = %tag,
            consensus = result.consensus_reached(),
            "Recorded reasoning result"
        );
        Ok(id)
    }

    /// Write a raw vector to the first tier and the write-through tiers
    pub fn store_vector(&self, vector: MemoryVector) -> Result<String, MemoryError> {
        self.write(vector)
    }

    fn write(&self, vector: MemoryVector) -> Result<String, MemoryError> {
        let id = self.first_tier().store.store(vector.clone())?;
        for tier in self.tiers.iter().skip(1).filter(|t| t.write_through) {
            tier.store.store(vector.clone().with_id(id.clone()))?;
            debug!(id = id.as_str(), tier = tier.name.as_str(), "Wrote through");
        }
        Ok(id)
    }

    /// Look a record up tier by tier, stopping at the first hit.
    pub fn retrieve(&self, id: &str) -> Result<Option<MemoryVector>, MemoryError> {
        self.metrics.increment(METRICS_KIND, "retrieve");

        for (index, tier) in self.tiers.iter().enumerate() {
            match tier.store.retrieve(id)? {
                Some(vector) => {
                    lock(&self.counters)[index].hits += 1;
                    if index > 0 && self.params.promote_on_hit {
                        debug!(id, from = tier.name.as_str(), "Promoting record to first tier");
                        self.first_tier().store.store(vector.clone())?;
                    }
                    return Ok(Some(vector));
                }
                None => lock(&self.counters)[index].misses += 1,
            }
        }

        Ok(None)
    }

    /// Up to `k` reasoning results tagged `phase`, closest to `embedding` first.
    pub fn query(
        &self,
        phase: EdrrPhase,
        embedding: &[f32],
        k: usize,
    ) -> Result<Vec<ReasoningResult>, MemoryError> {
        self.metrics.increment(METRICS_KIND, "query");

        let mut seen = HashSet::new();
        let mut candidates = Vec::new();
        for tier in &self.tiers {
            let count = tier.store.stats()?.count;
            if count == 0 {
                continue;
            }
            for hit in tier.store.similarity_search(embedding, count)? {
                if !is_result_in_phase(&hit.vector, phase) {
                    continue;
                }
                if seen.insert(hit.id().to_string()) {
                    candidates.push(hit);
                }
            }
        }

        candidates.sort_by(|a, b| a.distance.total_cmp(&b.distance).then_with(|| a.id().cmp(b.id())));
        candidates.truncate(k);

        candidates
            .into_iter()
            .map(|hit| decode_result(&hit.vector))
            .collect()
    }

    /// Every reasoning result tagged `phase`, oldest first.
    pub fn query_by_phase(&self, phase: EdrrPhase) -> Result<Vec<ReasoningResult>, MemoryError> {
        self.metrics.increment(METRICS_KIND, "query");

        let mut seen = HashSet::new();
        let mut results = Vec::new();
        for tier in &self.tiers {
            for vector in tier.store.all()? {
                if !is_result_in_phase(&vector, phase) {
                    continue;
                }
                let id = vector.id.clone().unwrap_or_default();
                if seen.insert(id) {
                    results.push(decode_result(&vector)?);
                }
            }
        }

        results.sort_by_key(|r| r.created_at());
        Ok(results)
    }

    /// Number of work items waiting for [`flush_pending`](Self::flush_pending)
    pub fn pending_len(&self) -> usize {
        lock(&self.pending).len()
    }

    /// Write buffered work items to the first tier.
    ///
    /// On a store error the unwritten items stay buffered.
    pub fn flush_pending(&self) -> Result<usize, MemoryError> {
        let items: Vec<WorkItem> = lock(&self.pending).drain(..).collect();
        if items.is_empty() {
            return Ok(0);
        }
        self.metrics.increment(METRICS_KIND, "flush");

        let mut written = 0;
        let mut remaining = items.into_iter();
        while let Some(item) = remaining.next() {
            if let Err(e) = self.write_work_item(&item) {
                let mut pending = lock(&self.pending);
                let mut restored: Vec<WorkItem> = std::iter::once(item).chain(remaining).collect();
                restored.append(&mut pending);
                *pending = restored;
                return Err(e);
            }
            written += 1;
        }

        debug!(written, "Flushed pending work items");
        Ok(written)
    }

    fn write_work_item(&self, item: &WorkItem) -> Result<String, MemoryError> {
        let payload =
            serde_json::to_value(item).map_err(|e| MemoryError::Serialization(e.to_string()))?;
        let vector = MemoryVector::new(text_embedding(&item.description, self.params.dimension))
            .with_id(item.id.clone())
            .with_payload(payload)
            .with_phase(item.phase)
            .with_metadata(KIND_KEY, KIND_WORK_ITEM);
        self.write(vector)
    }

    pub fn tier_stats(&self) -> Vec<TierStats> {
        let counters = lock(&self.counters);
        self.tiers
            .iter()
            .zip(counters.iter())
            .map(|(tier, c)| {
                let total = c.hits + c.misses;
                TierStats {
                    name: tier.name.clone(),
                    hits: c.hits,
                    misses: c.misses,
                    hit_rate: if total == 0 {
                        0.0
                    } else {
                        c.hits as f64 / total as f64
                    },
                }
            })
            .collect()
    }
}

impl WorkSink for TieredMemoryManager {
    fn accept(&self, item: WorkItem) {
        debug!(id = item.id.as_str(), phase = %item.phase, "Buffered work item");
        lock(&self.pending).push(item);
    }
}

fn is_result_in_phase(vector: &MemoryVector, phase: EdrrPhase) -> bool {
    vector.kind() == Some(KIND_REASONING_RESULT) && vector.phase == Some(phase)
}

fn decode_result(vector: &MemoryVector) -> Result<ReasoningResult, MemoryError> {
    serde_json::from_value(vector.payload.clone())
        .map_err(|e| MemoryError::Serialization(e.to_string()))
}
