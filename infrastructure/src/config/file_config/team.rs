//! Team configuration from TOML (`[team]` section)

use edrr_domain::AgentProfile;
use serde::{Deserialize, Serialize};

/// One agent entry (`[[team.agents]]`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileAgentConfig {
    pub id: String,
    #[serde(default)]
    pub expertise: Vec<String>,
}

impl FileAgentConfig {
    fn new(id: &str, expertise: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            expertise: expertise.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Raw team configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTeamConfig {
    pub agents: Vec<FileAgentConfig>,
}

impl Default for FileTeamConfig {
    /// One agent leaning towards each phase
    fn default() -> Self {
        Self {
            agents: vec![
                FileAgentConfig::new("explorer", &["exploration", "brainstorming", "research"]),
                FileAgentConfig::new("analyst", &["analysis", "comparison", "evaluation"]),
                FileAgentConfig::new("refiner", &["refinement", "optimization", "precision"]),
                FileAgentConfig::new("reviewer", &["reflection", "review", "learning"]),
            ],
        }
    }
}

impl FileTeamConfig {
    pub fn to_profiles(&self) -> Vec<AgentProfile> {
        self.agents
            .iter()
            .map(|a| AgentProfile::new(a.id.trim()).with_expertise(a.expertise.iter().cloned()))
            .collect()
    }
}
