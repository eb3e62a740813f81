//! Output format value object

use serde::{Deserialize, Serialize};

/// How a finished EDRR cycle is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Every phase with roles, perspectives and outcome
    Full,
    /// Only the final synthesis and consensus status (default)
    #[default]
    Synthesis,
    /// Phase reports as JSON
    Json,
}
