//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw logging configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL transcript of every recorded phase result
    pub reasoning_log: Option<PathBuf>,
    /// Directory for daily-rotated tracing output
    pub dir: Option<PathBuf>,
}
