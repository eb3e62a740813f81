//! Chat reporting port.
//!
//! Each recorded phase result is turned into a [`ChatMessage`] and handed
//! to a [`ChatReporter`]. Reporting is fire-and-forget: nothing the
//! reporter does feeds back into the session.

use edrr_domain::{EdrrPhase, ReasoningResult, RoleAssignment};
use serde::Serialize;

/// A reasoning result condensed for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub change_id: String,
    /// Phase tag the result was recorded under.
    pub phase: EdrrPhase,
    /// Phase that was active when consensus was attempted.
    pub attempted_in: EdrrPhase,
    /// Agent leading the phase, if any.
    pub primus: Option<String>,
    pub consensus_reached: bool,
    pub synthesis: String,
    pub failure_reason: Option<String>,
    pub disciplines: Vec<String>,
    pub record_id: String,
}

impl ChatMessage {
    pub fn from_result(result: &ReasoningResult, roles: &RoleAssignment, record_id: &str) -> Self {
        Self {
            change_id: result.change_id().to_string(),
            phase: result.phase(),
            attempted_in: result.attempted_in(),
            primus: roles.primus().map(str::to_string),
            consensus_reached: result.consensus_reached(),
            synthesis: result.synthesis().to_string(),
            failure_reason: result.outcome().failure_reason().map(str::to_string),
            disciplines: result
                .discipline_labels()
                .into_iter()
                .map(str::to_string)
                .collect(),
            record_id: record_id.to_string(),
        }
    }

    /// One-line summary for plain-text reporters.
    pub fn summary(&self) -> String {
        match &self.failure_reason {
            None => format!("[{}] consensus reached: {}", self.attempted_in, self.synthesis),
            Some(reason) => format!("[{}] consensus failed: {}", self.attempted_in, reason),
        }
    }
}

/// Port for presenting phase results to a human or a transcript.
///
/// `display` is synchronous and non-fallible; reporter failures are the
/// reporter's own business.
pub trait ChatReporter: Send + Sync {
    fn display(&self, message: &ChatMessage);
}

/// No-op implementation for tests and when reporting is disabled.
pub struct NoChatReporter;

impl ChatReporter for NoChatReporter {
    fn display(&self, _message: &ChatMessage) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use edrr_domain::{AgentProfile, ConsensusOutcome, Dialectic, Perspective, ReasoningMode};

    #[test]
    fn test_failed_result_message() {
        let result = ReasoningResult::new(
            "c-1",
            EdrrPhase::Refine,
            &ReasoningMode::multi_disciplinary(["security", "performance"]),
            Dialectic::default(),
            vec![
                Perspective::new("security", "leak").with_conflict("tokens logged"),
                Perspective::new("performance", "fine"),
            ],
            ConsensusOutcome::Failed {
                reason: "security veto".to_string(),
            },
        );
        let roles = RoleAssignment::for_phase(EdrrPhase::Refine, &[AgentProfile::new("lead")]);

        let message = ChatMessage::from_result(&result, &roles, "rec-1");
        assert_eq!(message.phase, EdrrPhase::Retrospect);
        assert_eq!(message.attempted_in, EdrrPhase::Refine);
        assert_eq!(message.primus.as_deref(), Some("lead"));
        assert_eq!(message.disciplines, vec!["security", "performance"]);
        assert_eq!(message.summary(), "[REFINE] consensus failed: security veto");
    }
}
