//! Reasoning result entity

use super::mode::ReasoningMode;
use super::outcome::ConsensusOutcome;
use super::perspective::Perspective;
use crate::core::time::current_timestamp;
use crate::edrr::EdrrPhase;
use serde::{Deserialize, Serialize};

/// Thesis, antithesis and synthesis of one evaluation
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Dialectic {
    pub thesis: String,
    pub antithesis: String,
    pub synthesis: String,
}

/// Outcome of evaluating one requirement change (Entity)
///
/// The phase tag is fixed at construction: the phase in which consensus
/// was attempted, or RETROSPECT when consensus failed. The attempted
/// phase is kept separately for auditing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReasoningResult {
    change_id: String,
    #[serde(flatten)]
    dialectic: Dialectic,
    perspectives: Vec<Perspective>,
    outcome: ConsensusOutcome,
    phase: EdrrPhase,
    attempted_in: EdrrPhase,
    mode: String,
    created_at: u64,
}

impl ReasoningResult {
    pub fn new(
        change_id: impl Into<String>,
        attempted_in: EdrrPhase,
        mode: &ReasoningMode,
        dialectic: Dialectic,
        perspectives: Vec<Perspective>,
        outcome: ConsensusOutcome,
    ) -> Self {
        let phase = if outcome.is_reached() {
            attempted_in
        } else {
            EdrrPhase::Retrospect
        };

        Self {
            change_id: change_id.into(),
            dialectic,
            perspectives,
            outcome,
            phase,
            attempted_in,
            mode: mode.label().to_string(),
            created_at: current_timestamp(),
        }
    }

    pub fn change_id(&self) -> &str {
        &self.change_id
    }

    pub fn thesis(&self) -> &str {
        &self.dialectic.thesis
    }

    pub fn antithesis(&self) -> &str {
        &self.dialectic.antithesis
    }

    pub fn synthesis(&self) -> &str {
        &self.dialectic.synthesis
    }

    pub fn perspectives(&self) -> &[Perspective] {
        &self.perspectives
    }

    pub fn outcome(&self) -> &ConsensusOutcome {
        &self.outcome
    }

    pub fn consensus_reached(&self) -> bool {
        self.outcome.is_reached()
    }

    /// Phase tag this result is persisted under
    pub fn phase(&self) -> EdrrPhase {
        self.phase
    }

    /// Phase that was active when consensus was attempted
    pub fn attempted_in(&self) -> EdrrPhase {
        self.attempted_in
    }

    pub fn mode(&self) -> &str {
        &self.mode
    }

    pub fn created_at(&self) -> u64 {
        self.created_at
    }

    /// Distinct discipline labels, in first-seen order
    pub fn discipline_labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = Vec::new();
        for p in &self.perspectives {
            if !labels.contains(&p.discipline.as_str()) {
                labels.push(&p.discipline);
            }
        }
        labels
    }

    /// Text used to derive the memory embedding
    pub fn embedding_text(&self) -> String {
        let mut parts = vec![
            self.dialectic.thesis.as_str(),
            self.dialectic.antithesis.as_str(),
            self.dialectic.synthesis.as_str(),
        ];
        parts.extend(self.perspectives.iter().map(|p| p.content.as_str()));
        parts.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dialectic() -> Dialectic {
        Dialectic {
            thesis: "add caching".to_string(),
            antithesis: "stale reads".to_string(),
            synthesis: "cache with ttl".to_string(),
        }
    }

    #[test]
    fn test_reached_keeps_attempted_phase() {
        let result = ReasoningResult::new(
            "c-1",
            EdrrPhase::Refine,
            &ReasoningMode::Dialectical,
            dialectic(),
            vec![],
            ConsensusOutcome::Reached {
                synthesis: "cache with ttl".to_string(),
            },
        );
        assert_eq!(result.phase(), EdrrPhase::Refine);
        assert!(result.consensus_reached());
    }

    #[test]
    fn test_failed_is_tagged_retrospect() {
        let result = ReasoningResult::new(
            "c-1",
            EdrrPhase::Differentiate,
            &ReasoningMode::Dialectical,
            dialectic(),
            vec![],
            ConsensusOutcome::Failed {
                reason: "veto".to_string(),
            },
        );
        assert_eq!(result.phase(), EdrrPhase::Retrospect);
        assert_eq!(result.attempted_in(), EdrrPhase::Differentiate);
    }

    #[test]
    fn test_discipline_labels_are_distinct() {
        let result = ReasoningResult::new(
            "c-1",
            EdrrPhase::Expand,
            &ReasoningMode::multi_disciplinary(["security", "performance"]),
            dialectic(),
            vec![
                Perspective::new("security", "a"),
                Perspective::new("performance", "b"),
                Perspective::new("security", "c"),
            ],
            ConsensusOutcome::Reached {
                synthesis: "s".to_string(),
            },
        );
        assert_eq!(result.discipline_labels(), vec!["security", "performance"]);
        assert_eq!(result.mode(), "multi_disciplinary");
        assert!(result.embedding_text().contains("stale reads"));
    }

    #[test]
    fn test_json_round_trip() {
        let result = ReasoningResult::new(
            "c-9",
            EdrrPhase::Expand,
            &ReasoningMode::Dialectical,
            dialectic(),
            vec![Perspective::new("security", "ok").with_confidence(0.5)],
            ConsensusOutcome::Reached {
                synthesis: "cache with ttl".to_string(),
            },
        );
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["thesis"], "add caching");
        assert_eq!(json["phase"], "EXPAND");

        let back: ReasoningResult = serde_json::from_value(json).unwrap();
        assert_eq!(back, result);
    }
}
