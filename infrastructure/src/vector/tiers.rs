//! Memory tiers built from the `[memory]` configuration

use super::{InMemoryVectorStore, JsonFileVectorStore};
use crate::config::{FileMemoryConfig, FileTierBackend};
use edrr_application::MemoryTier;
use edrr_domain::{MetricsRegistry, StoreError, VectorStore};
use std::sync::Arc;
use tracing::info;

/// Open one store per configured tier, shallowest first.
///
/// Every tier shares the collection name and the embedding dimension.
/// File-backed tiers are write-through so every record reaches disk.
pub fn open_tiers(
    config: &FileMemoryConfig,
    metrics: Arc<MetricsRegistry>,
) -> Result<Vec<MemoryTier>, StoreError> {
    let dimension = Some(config.dimension).filter(|d| *d > 0);
    let mut tiers = Vec::with_capacity(config.tiers.len());

    for tier in &config.tiers {
        let durable = tier.backend == FileTierBackend::JsonFile;
        let store: Arc<dyn VectorStore> = match (tier.backend, &tier.path) {
            (FileTierBackend::Memory, _) => {
                let store = InMemoryVectorStore::new(config.collection.clone(), metrics.clone());
                Arc::new(match dimension {
                    Some(d) => store.with_dimension(d),
                    None => store,
                })
            }
            (FileTierBackend::JsonFile, Some(path)) => Arc::new(JsonFileVectorStore::open(
                path,
                config.collection.clone(),
                dimension,
                metrics.clone(),
            )?),
            (FileTierBackend::JsonFile, None) => {
                return Err(StoreError::Backend(format!(
                    "memory tier '{}' has no path",
                    tier.name
                )));
            }
        };
        info!(tier = tier.name.as_str(), backend = ?tier.backend, "Opened memory tier");
        tiers.push(MemoryTier::new(tier.name.clone(), store).with_write_through(durable));
    }

    Ok(tiers)
}
