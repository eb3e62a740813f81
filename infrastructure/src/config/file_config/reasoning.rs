//! Reasoning configuration from TOML (`[reasoning]` section)

use super::ConfigValidationError;
use edrr_domain::{AgreementRule, ConsensusPolicy, ReasoningMode};
use serde::{Deserialize, Serialize};

/// Raw reasoning configuration from TOML
///
/// ```toml
/// [reasoning]
/// mode = "multi_disciplinary"
/// disciplines = ["security", "performance"]
/// rule = "majority"
/// min_confidence = 0.6
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReasoningConfig {
    /// "dialectical" or "multi_disciplinary"
    pub mode: String,
    /// Disciplines consulted in multi-disciplinary mode
    pub disciplines: Vec<String>,
    /// Agreement rule, e.g. "unanimous", "majority", "atleast:2", "75%"
    pub rule: String,
    pub min_confidence: f64,
}

impl Default for FileReasoningConfig {
    fn default() -> Self {
        Self {
            mode: "dialectical".to_string(),
            disciplines: Vec::new(),
            rule: "unanimous".to_string(),
            min_confidence: ConsensusPolicy::default().min_confidence,
        }
    }
}

impl FileReasoningConfig {
    pub fn to_mode(&self) -> Result<ReasoningMode, ConfigValidationError> {
        match self.mode.trim().to_lowercase().replace('-', "_").as_str() {
            "dialectical" => Ok(ReasoningMode::Dialectical),
            "multi_disciplinary" | "multidisciplinary" => Ok(ReasoningMode::multi_disciplinary(
                self.disciplines.iter().cloned(),
            )),
            _ => Err(ConfigValidationError::UnknownMode(self.mode.clone())),
        }
    }

    pub fn to_policy(&self) -> Result<ConsensusPolicy, ConfigValidationError> {
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(ConfigValidationError::InvalidConfidence(self.min_confidence));
        }
        let rule: AgreementRule = self.rule.parse()?;
        Ok(ConsensusPolicy::new(rule).with_min_confidence(self.min_confidence))
    }
}
