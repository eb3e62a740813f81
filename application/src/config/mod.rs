//! Application-level configuration.
//!
//! - [`EdrrConfig`]: team, reasoning mode and consensus policy for sessions
//! - [`MemoryParams`]: embedding dimension and tier promotion

pub mod edrr_config;
pub mod memory_params;

pub use edrr_config::EdrrConfig;
pub use memory_params::MemoryParams;
