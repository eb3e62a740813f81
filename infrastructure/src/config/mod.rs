//! Configuration file loading for edrr-council
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `EDRR_` environment variables, `__` separating nested keys
//! 2. `--config <path>` specified file
//! 3. Project root: `./edrr.toml` or `./.edrr.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/edrr-council/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileAgentConfig, FileConfig, FileLoggingConfig, FileMemoryConfig,
    FileOutputConfig, FileReasoningConfig, FileTeamConfig, FileTierBackend, FileTierConfig,
};
pub use loader::ConfigLoader;
