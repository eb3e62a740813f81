//! Consensus outcome

use serde::{Deserialize, Serialize};

/// Result of checking a synthesis against the collected perspectives
///
/// `Failed` is an ordinary value: it is persisted and reported like any
/// other outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ConsensusOutcome {
    Reached { synthesis: String },
    Failed { reason: String },
}

impl ConsensusOutcome {
    pub fn is_reached(&self) -> bool {
        matches!(self, ConsensusOutcome::Reached { .. })
    }

    /// Failure reason, if consensus was not reached
    pub fn failure_reason(&self) -> Option<&str> {
        match self {
            ConsensusOutcome::Failed { reason } => Some(reason),
            ConsensusOutcome::Reached { .. } => None,
        }
    }
}

impl std::fmt::Display for ConsensusOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConsensusOutcome::Reached { .. } => write!(f, "consensus reached"),
            ConsensusOutcome::Failed { reason } => write!(f, "consensus failed: {}", reason),
        }
    }
}
