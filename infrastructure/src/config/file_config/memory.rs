//! Memory configuration from TOML (`[memory]` section)

use edrr_application::MemoryParams;
use edrr_domain::memory::DEFAULT_EMBEDDING_DIMENSION;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Storage backend of one memory tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileTierBackend {
    #[default]
    Memory,
    JsonFile,
}

/// One tier entry (`[[memory.tiers]]`), shallowest first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileTierConfig {
    pub name: String,
    #[serde(default)]
    pub backend: FileTierBackend,
    /// Required for `json_file` tiers
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Raw memory configuration from TOML
///
/// ```toml
/// [memory]
/// dimension = 5
///
/// [[memory.tiers]]
/// name = "working"
///
/// [[memory.tiers]]
/// name = "archive"
/// backend = "json_file"
/// path = ".edrr/memory.json"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileMemoryConfig {
    /// Collection name used by every tier
    pub collection: String,
    pub dimension: usize,
    pub promote_on_hit: bool,
    pub tiers: Vec<FileTierConfig>,
}

impl Default for FileMemoryConfig {
    fn default() -> Self {
        Self {
            collection: "edrr".to_string(),
            dimension: DEFAULT_EMBEDDING_DIMENSION,
            promote_on_hit: true,
            tiers: vec![FileTierConfig {
                name: "working".to_string(),
                backend: FileTierBackend::Memory,
                path: None,
            }],
        }
    }
}

impl FileMemoryConfig {
    pub fn to_params(&self) -> MemoryParams {
        MemoryParams::default()
            .with_dimension(self.dimension)
            .with_promote_on_hit(self.promote_on_hit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_single_memory_tier() {
        let config = FileMemoryConfig::default();
        assert_eq!(config.tiers.len(), 1);
        assert_eq!(config.tiers[0].backend, FileTierBackend::Memory);
        assert_eq!(config.to_params().dimension, DEFAULT_EMBEDDING_DIMENSION);
    }

    #[test]
    fn test_deserialize_tiers() {
        let toml_str = r#"
[memory]
dimension = 8
promote_on_hit = false

[[memory.tiers]]
name = "working"

[[memory.tiers]]
name = "archive"
backend = "json_file"
path = "/tmp/edrr/archive.json"
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        let memory = &config.memory;
        assert_eq!(memory.collection, "edrr");
        assert_eq!(memory.tiers.len(), 2);
        assert_eq!(memory.tiers[1].backend, FileTierBackend::JsonFile);
        assert_eq!(
            memory.tiers[1].path.as_deref(),
            Some(std::path::Path::new("/tmp/edrr/archive.json"))
        );

        let params = memory.to_params();
        assert_eq!(params.dimension, 8);
        assert!(!params.promote_on_hit);
    }
}
