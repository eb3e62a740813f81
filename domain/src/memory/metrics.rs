//! Operation counters

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

/// Counter registry keyed by `(kind, operation)`
///
/// Constructed explicitly and shared as `Arc<MetricsRegistry>`. Starts
/// empty and only resets when [`reset`](Self::reset) is called.
///
/// # Example
///
/// ```
/// use edrr_domain::memory::MetricsRegistry;
///
/// let metrics = MetricsRegistry::new();
/// metrics.increment("vector_store", "store");
/// metrics.increment("vector_store", "store");
/// assert_eq!(metrics.count("vector_store", "store"), 2);
/// assert_eq!(metrics.snapshot().get("vector_store.store"), Some(&2));
/// ```
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    counters: Mutex<BTreeMap<(String, String), u64>>,
}

impl MetricsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn counters(&self) -> MutexGuard<'_, BTreeMap<(String, String), u64>> {
        // Counters stay usable even if a holder panicked mid-increment.
        self.counters
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn increment(&self, kind: &str, operation: &str) {
        *self
            .counters()
            .entry((kind.to_string(), operation.to_string()))
            .or_insert(0) += 1;
    }

    pub fn count(&self, kind: &str, operation: &str) -> u64 {
        self.counters()
            .get(&(kind.to_string(), operation.to_string()))
            .copied()
            .unwrap_or(0)
    }

    /// All counters keyed as `"kind.operation"`
    pub fn snapshot(&self) -> BTreeMap<String, u64> {
        self.counters()
            .iter()
            .map(|((kind, op), n)| (format!("{}.{}", kind, op), *n))
            .collect()
    }

    pub fn reset(&self) {
        self.counters().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_starts_empty() {
        assert!(MetricsRegistry::new().snapshot().is_empty());
    }

    #[test]
    fn test_reset_clears_everything() {
        let metrics = MetricsRegistry::new();
        metrics.increment("memory", "record");
        metrics.increment("vector_store", "delete");
        metrics.reset();
        assert_eq!(metrics.count("memory", "record"), 0);
        assert!(metrics.snapshot().is_empty());
    }

    #[test]
    fn test_concurrent_increments() {
        let metrics = Arc::new(MetricsRegistry::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let metrics = Arc::clone(&metrics);
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        metrics.increment("vector_store", "retrieve");
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(metrics.count("vector_store", "retrieve"), 400);
    }
}
