//! Tiered memory parameters.

use edrr_domain::memory::DEFAULT_EMBEDDING_DIMENSION;
use serde::{Deserialize, Serialize};

/// Controls how the tiered memory embeds and promotes records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryParams {
    /// Dimension of the deterministic text embedding.
    pub dimension: usize,
    /// Copy hits found in deeper tiers into the first tier.
    pub promote_on_hit: bool,
}

impl Default for MemoryParams {
    fn default() -> Self {
        Self {
            dimension: DEFAULT_EMBEDDING_DIMENSION,
            promote_on_hit: true,
        }
    }
}

impl MemoryParams {
    pub fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = dimension;
        self
    }

    pub fn with_promote_on_hit(mut self, promote: bool) -> Self {
        self.promote_on_hit = promote;
        self
    }
}
