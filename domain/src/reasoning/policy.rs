//! Consensus validity predicate

use super::outcome::ConsensusOutcome;
use super::perspective::Perspective;
use super::rule::AgreementRule;
use serde::{Deserialize, Serialize};

/// Decides whether a synthesis is accepted
///
/// A synthesis stands when it is non-empty, enough perspectives agree
/// with it under the [`AgreementRule`] (conflicting perspectives count as
/// disagreeing) and the mean confidence is at least `min_confidence`.
/// With no perspectives at all only the first check applies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConsensusPolicy {
    pub rule: AgreementRule,
    pub min_confidence: f64,
}

impl Default for ConsensusPolicy {
    fn default() -> Self {
        Self {
            rule: AgreementRule::Unanimous,
            min_confidence: 0.5,
        }
    }
}

impl ConsensusPolicy {
    pub fn new(rule: AgreementRule) -> Self {
        Self {
            rule,
            ..Default::default()
        }
    }

    pub fn with_min_confidence(mut self, min_confidence: f64) -> Self {
        self.min_confidence = min_confidence.clamp(0.0, 1.0);
        self
    }

    pub fn evaluate(&self, synthesis: &str, perspectives: &[Perspective]) -> ConsensusOutcome {
        if synthesis.trim().is_empty() {
            return ConsensusOutcome::Failed {
                reason: "synthesis is empty".to_string(),
            };
        }

        if perspectives.is_empty() {
            return ConsensusOutcome::Reached {
                synthesis: synthesis.to_string(),
            };
        }

        let total = perspectives.len();
        let conflicts: Vec<String> = perspectives
            .iter()
            .filter_map(|p| {
                p.conflict
                    .as_ref()
                    .map(|reason| format!("{}: {}", p.discipline, reason))
            })
            .collect();
        let agreeing = total - conflicts.len();

        if !self.rule.is_satisfied(agreeing, total) {
            return ConsensusOutcome::Failed {
                reason: format!(
                    "{} of {} perspectives agree, {} required; conflicts: {}",
                    agreeing,
                    total,
                    self.rule,
                    conflicts.join("; ")
                ),
            };
        }

        let mean = perspectives.iter().map(|p| p.confidence).sum::<f64>() / total as f64;
        if mean < self.min_confidence {
            return ConsensusOutcome::Failed {
                reason: format!(
                    "mean confidence {:.2} below required {:.2}",
                    mean, self.min_confidence
                ),
            };
        }

        ConsensusOutcome::Reached {
            synthesis: synthesis.to_string(),
        }
    }
}
