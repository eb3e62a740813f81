//! Raw configuration structures for TOML deserialization
//!
//! These types represent the TOML file structure and are converted to
//! application types ([`EdrrConfig`]) via [`FileConfig::to_edrr_config`].

mod logging;
mod memory;
mod output;
mod reasoning;
mod team;

pub use logging::FileLoggingConfig;
pub use memory::{FileMemoryConfig, FileTierBackend, FileTierConfig};
pub use output::FileOutputConfig;
pub use reasoning::FileReasoningConfig;
pub use team::{FileAgentConfig, FileTeamConfig};

use edrr_application::EdrrConfig;
use edrr_domain::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Configuration validation errors
#[derive(Error, Debug)]
pub enum ConfigValidationError {
    #[error("memory.dimension cannot be 0")]
    ZeroDimension,

    #[error("agent id cannot be empty")]
    EmptyAgentId,

    #[error("agent '{0}' is listed more than once")]
    DuplicateAgent(String),

    #[error("unknown reasoning mode '{0}' (expected dialectical or multi_disciplinary)")]
    UnknownMode(String),

    #[error("invalid reasoning.rule: {0}")]
    InvalidRule(#[from] DomainError),

    #[error("reasoning.min_confidence must be within 0.0..=1.0, got {0}")]
    InvalidConfidence(f64),

    #[error("at least one memory tier is required")]
    NoTiers,

    #[error("memory tier '{0}' uses json_file but has no path")]
    MissingTierPath(String),
}

/// Complete configuration file structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Agents and their expertise
    pub team: FileTeamConfig,
    /// Reasoning mode and consensus policy
    pub reasoning: FileReasoningConfig,
    /// Embedding dimension and storage tiers
    pub memory: FileMemoryConfig,
    pub output: FileOutputConfig,
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the configuration, stopping at the first problem
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.memory.dimension == 0 {
            return Err(ConfigValidationError::ZeroDimension);
        }

        let mut seen = HashSet::new();
        for agent in &self.team.agents {
            let id = agent.id.trim();
            if id.is_empty() {
                return Err(ConfigValidationError::EmptyAgentId);
            }
            if !seen.insert(id) {
                return Err(ConfigValidationError::DuplicateAgent(id.to_string()));
            }
        }

        self.reasoning.to_mode()?;
        self.reasoning.to_policy()?;

        if self.memory.tiers.is_empty() {
            return Err(ConfigValidationError::NoTiers);
        }
        for tier in &self.memory.tiers {
            if tier.backend == FileTierBackend::JsonFile && tier.path.is_none() {
                return Err(ConfigValidationError::MissingTierPath(tier.name.clone()));
            }
        }

        Ok(())
    }

    /// Validate and convert into the application's session configuration
    pub fn to_edrr_config(&self) -> Result<EdrrConfig, ConfigValidationError> {
        self.validate()?;
        Ok(EdrrConfig::default()
            .with_team(self.team.to_profiles())
            .with_mode(self.reasoning.to_mode()?)
            .with_policy(self.reasoning.to_policy()?)
            .with_memory(self.memory.to_params()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edrr_domain::{AgreementRule, OutputFormat, ReasoningMode};

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[[team.agents]]
id = "alice"
expertise = ["analysis"]

[[team.agents]]
id = "bob"
expertise = ["brainstorming"]

[reasoning]
mode = "multi_disciplinary"
disciplines = ["security", "performance"]
rule = "majority"
min_confidence = 0.7

[memory]
dimension = 6

[[memory.tiers]]
name = "working"

[output]
format = "full"
color = false

[logging]
reasoning_log = "/tmp/edrr/reasoning.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.output.format, Some(OutputFormat::Full));
        assert!(config.logging.reasoning_log.is_some());

        let edrr = config.to_edrr_config().unwrap();
        assert_eq!(edrr.agent_ids(), vec!["alice", "bob"]);
        assert_eq!(
            edrr.mode,
            ReasoningMode::multi_disciplinary(["security", "performance"])
        );
        assert_eq!(edrr.policy.rule, AgreementRule::Majority);
        assert_eq!(edrr.policy.min_confidence, 0.7);
        assert_eq!(edrr.memory.dimension, 6);
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[reasoning]
rule = "atleast:2"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.reasoning.to_policy().unwrap().rule, AgreementRule::AtLeast(2));
        // Defaults should apply
        assert_eq!(config.team, FileTeamConfig::default());
        assert_eq!(config.memory, FileMemoryConfig::default());
        assert!(config.output.color);
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = FileConfig::default();
        assert!(config.validate().is_ok());
        let edrr = config.to_edrr_config().unwrap();
        assert_eq!(edrr.team.len(), 4);
        assert_eq!(edrr.mode, ReasoningMode::Dialectical);
    }

    #[test]
    fn test_validate_zero_dimension() {
        let toml_str = r#"
[memory]
dimension = 0
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::ZeroDimension)
        ));
    }

    #[test]
    fn test_validate_agent_ids() {
        let toml_str = r#"
[[team.agents]]
id = "  "
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::EmptyAgentId)
        ));

        let toml_str = r#"
[[team.agents]]
id = "alice"

[[team.agents]]
id = "alice"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::DuplicateAgent(id)) if id == "alice"
        ));
    }

    #[test]
    fn test_validate_unknown_rule() {
        let toml_str = r#"
[reasoning]
rule = "most"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidRule(_))
        ));
    }

    #[test]
    fn test_validate_file_tier_without_path() {
        let toml_str = r#"
[[memory.tiers]]
name = "archive"
backend = "json_file"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::MissingTierPath(name)) if name == "archive"
        ));
    }
}
