//! Session configuration.

use super::memory_params::MemoryParams;
use edrr_domain::{AgentProfile, ConsensusPolicy, ReasoningMode};

/// Everything a session needs besides its ports.
///
/// Built by the infrastructure config loader and handed to
/// [`EdrrService`](crate::use_cases::run_edrr::EdrrService).
#[derive(Debug, Clone, Default)]
pub struct EdrrConfig {
    /// Agents taking part in every session
    pub team: Vec<AgentProfile>,
    pub mode: ReasoningMode,
    pub policy: ConsensusPolicy,
    pub memory: MemoryParams,
}

impl EdrrConfig {
    // ==================== Builder Methods ====================

    pub fn with_team(mut self, team: Vec<AgentProfile>) -> Self {
        self.team = team;
        self
    }

    pub fn with_mode(mut self, mode: ReasoningMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_policy(mut self, policy: ConsensusPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_memory(mut self, memory: MemoryParams) -> Self {
        self.memory = memory;
        self
    }

    pub fn agent_ids(&self) -> Vec<String> {
        self.team.iter().map(|a| a.id.clone()).collect()
    }
}
