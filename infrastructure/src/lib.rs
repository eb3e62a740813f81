//! Infrastructure layer for edrr-council
//!
//! This crate contains adapters that implement the ports and repository
//! traits defined in the inner layers: vector store backends, configuration
//! file loading, the JSONL reasoning transcript and the offline reasoning
//! provider.

pub mod config;
pub mod logging;
pub mod reasoning;
pub mod vector;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileMemoryConfig, FileOutputConfig,
    FileReasoningConfig, FileTeamConfig, FileTierBackend,
};
pub use logging::JsonlChatReporter;
pub use reasoning::HeuristicReasoningProvider;
pub use vector::{InMemoryVectorStore, JsonFileVectorStore, open_tiers};
