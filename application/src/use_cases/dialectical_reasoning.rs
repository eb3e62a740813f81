//! Dialectical reasoning use case
//!
//! Evaluates one change in one phase:
//!
//! 1. thesis
//! 2. antithesis
//! 3. one perspective per discipline (multi-disciplinary mode, concurrent)
//! 4. synthesis
//! 5. consensus check against the [`ConsensusPolicy`]

use crate::ports::progress::{NoProgress, PhaseProgressNotifier};
use crate::ports::reasoning_provider::{ProviderError, ReasoningProvider};
use edrr_domain::reasoning::MIN_DISCIPLINES;
use edrr_domain::{
    ConsensusOutcome, ConsensusPolicy, Dialectic, EdrrPhase, Perspective, ReasoningMode,
    ReasoningResult, RequirementChange, Role, RoleAssignment,
};
use futures::future::join_all;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Errors that can occur during evaluation
///
/// A failed consensus is not an error; it is returned as a result.
#[derive(Error, Debug)]
pub enum ReasonerError {
    #[error("Only {received} distinct disciplines answered, at least {required} required")]
    InsufficientPerspectives { required: usize, received: usize },

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),
}

/// Use case for evaluating a change dialectically
pub struct DialecticalReasoner<P: ReasoningProvider + 'static> {
    provider: Arc<P>,
    policy: ConsensusPolicy,
}

impl<P: ReasoningProvider + 'static> DialecticalReasoner<P> {
    pub fn new(provider: Arc<P>) -> Self {
        Self {
            provider,
            policy: ConsensusPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: ConsensusPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> &ConsensusPolicy {
        &self.policy
    }

    /// Evaluate without role attribution or progress callbacks
    pub async fn evaluate(
        &self,
        change: &RequirementChange,
        phase: EdrrPhase,
        mode: &ReasoningMode,
    ) -> Result<ReasoningResult, ReasonerError> {
        self.evaluate_with_progress(change, phase, mode, &RoleAssignment::empty(phase), &NoProgress)
            .await
    }

    /// Evaluate with the phase's roles and progress callbacks.
    ///
    /// Perspectives without an agent are attributed to the team's
    /// non-primus members in role order.
    pub async fn evaluate_with_progress(
        &self,
        change: &RequirementChange,
        phase: EdrrPhase,
        mode: &ReasoningMode,
        roles: &RoleAssignment,
        progress: &dyn PhaseProgressNotifier,
    ) -> Result<ReasoningResult, ReasonerError> {
        info!(
            change_id = change.id(),
            phase = %phase,
            mode = mode.label(),
            primus = roles.primus().unwrap_or("-"),
            "Evaluating change"
        );

        let thesis = self.provider.thesis(change, phase).await?;
        let antithesis = self.provider.antithesis(change, phase, &thesis).await?;

        let mut perspectives = self.gather_perspectives(change, phase, mode, progress).await;
        if mode.is_multi_disciplinary() {
            let received = distinct_disciplines(&perspectives);
            if received < MIN_DISCIPLINES {
                return Err(ReasonerError::InsufficientPerspectives {
                    required: MIN_DISCIPLINES,
                    received,
                });
            }
        }
        attribute_agents(&mut perspectives, phase, roles);

        let synthesis = self
            .provider
            .synthesis(change, phase, &thesis, &antithesis, &perspectives)
            .await?;

        let outcome = self.policy.evaluate(&synthesis, &perspectives);
        match &outcome {
            ConsensusOutcome::Reached { .. } => {
                info!(change_id = change.id(), phase = %phase, "Consensus reached");
            }
            ConsensusOutcome::Failed { reason } => {
                error!(change_id = change.id(), phase = %phase, reason = reason.as_str(), "Consensus failed");
            }
        }

        Ok(ReasoningResult::new(
            change.id(),
            phase,
            mode,
            Dialectic {
                thesis,
                antithesis,
                synthesis,
            },
            perspectives,
            outcome,
        ))
    }

    /// Ask every requested discipline concurrently, keeping request order.
    ///
    /// Disciplines whose request fails are skipped.
    async fn gather_perspectives(
        &self,
        change: &RequirementChange,
        phase: EdrrPhase,
        mode: &ReasoningMode,
        progress: &dyn PhaseProgressNotifier,
    ) -> Vec<Perspective> {
        let disciplines = mode.requested_disciplines();
        if disciplines.is_empty() {
            return Vec::new();
        }
        debug!(?disciplines, "Requesting perspectives");

        let requests = disciplines.iter().map(|discipline| async move {
            let result = self.provider.perspective(change, phase, discipline).await;
            (discipline, result)
        });

        let mut perspectives = Vec::with_capacity(disciplines.len());
        for (discipline, result) in join_all(requests).await {
            match result {
                Ok(mut perspective) => {
                    perspective.discipline = discipline.clone();
                    progress.on_perspective(phase, discipline, true);
                    perspectives.push(perspective);
                }
                Err(e) => {
                    warn!(discipline = discipline.as_str(), "Perspective failed: {}", e);
                    progress.on_perspective(phase, discipline, false);
                }
            }
        }
        perspectives
    }
}

fn distinct_disciplines(perspectives: &[Perspective]) -> usize {
    let mut labels: Vec<&str> = perspectives.iter().map(|p| p.discipline.as_str()).collect();
    labels.sort_unstable();
    labels.dedup();
    labels.len()
}

fn attribute_agents(perspectives: &mut [Perspective], phase: EdrrPhase, roles: &RoleAssignment) {
    let mut agents: Vec<&str> = Vec::new();
    for role in Role::order_for(phase).into_iter().skip(1).chain([Role::Primus]) {
        agents.extend(roles.agents_with(role));
    }
    if agents.is_empty() {
        return;
    }

    for (i, perspective) in perspectives.iter_mut().enumerate() {
        if perspective.agent_id.is_none() {
            perspective.agent_id = Some(agents[i % agents.len()].to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use edrr_domain::{AgentProfile, ChangeType};
    use std::collections::HashSet;
    use std::sync::Mutex;

    // ==================== Test Mocks ====================

    /// Scripted provider: disciplines listed in `conflicts` object, those in
    /// `failing` error out.
    struct MockProvider {
        conflicts: HashSet<String>,
        failing: HashSet<String>,
        synthesis: String,
        asked: Mutex<Vec<String>>,
    }

    impl MockProvider {
        fn new() -> Self {
            Self {
                conflicts: HashSet::new(),
                failing: HashSet::new(),
                synthesis: "adopt with safeguards".to_string(),
                asked: Mutex::new(Vec::new()),
            }
        }

        fn with_conflict(mut self, discipline: &str) -> Self {
            self.conflicts.insert(discipline.to_string());
            self
        }

        fn with_failure(mut self, discipline: &str) -> Self {
            self.failing.insert(discipline.to_string());
            self
        }
    }

    #[async_trait]
    impl ReasoningProvider for MockProvider {
        async fn thesis(
            &self,
            change: &RequirementChange,
            _phase: EdrrPhase,
        ) -> Result<String, ProviderError> {
            Ok(format!("do it: {}", change.description()))
        }

        async fn antithesis(
            &self,
            _change: &RequirementChange,
            _phase: EdrrPhase,
            thesis: &str,
        ) -> Result<String, ProviderError> {
            Ok(format!("risks of '{}'", thesis))
        }

        async fn perspective(
            &self,
            _change: &RequirementChange,
            _phase: EdrrPhase,
            discipline: &str,
        ) -> Result<Perspective, ProviderError> {
            self.asked.lock().unwrap().push(discipline.to_string());
            if self.failing.contains(discipline) {
                return Err(ProviderError::UnsupportedDiscipline(discipline.to_string()));
            }
            let perspective = Perspective::new(discipline, format!("{} view", discipline))
                .with_confidence(0.9);
            if self.conflicts.contains(discipline) {
                Ok(perspective.with_conflict("irreconcilable"))
            } else {
                Ok(perspective)
            }
        }

        async fn synthesis(
            &self,
            _change: &RequirementChange,
            _phase: EdrrPhase,
            _thesis: &str,
            _antithesis: &str,
            _perspectives: &[Perspective],
        ) -> Result<String, ProviderError> {
            Ok(self.synthesis.clone())
        }
    }

    /// Provider whose thesis call always fails
    struct BrokenProvider;

    #[async_trait]
    impl ReasoningProvider for BrokenProvider {
        async fn thesis(&self, _: &RequirementChange, _: EdrrPhase) -> Result<String, ProviderError> {
            Err(ProviderError::Unavailable("offline".to_string()))
        }

        async fn antithesis(
            &self,
            _: &RequirementChange,
            _: EdrrPhase,
            _: &str,
        ) -> Result<String, ProviderError> {
            unreachable!()
        }

        async fn perspective(
            &self,
            _: &RequirementChange,
            _: EdrrPhase,
            _: &str,
        ) -> Result<Perspective, ProviderError> {
            unreachable!()
        }

        async fn synthesis(
            &self,
            _: &RequirementChange,
            _: EdrrPhase,
            _: &str,
            _: &str,
            _: &[Perspective],
        ) -> Result<String, ProviderError> {
            unreachable!()
        }
    }

    fn change() -> RequirementChange {
        RequirementChange::with_id("chg-1", ChangeType::Modify, "cache session tokens").unwrap()
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_dialectical_mode_reaches_consensus() {
        let reasoner = DialecticalReasoner::new(Arc::new(MockProvider::new()));
        let result = reasoner
            .evaluate(&change(), EdrrPhase::Expand, &ReasoningMode::Dialectical)
            .await
            .unwrap();

        assert!(result.consensus_reached());
        assert_eq!(result.phase(), EdrrPhase::Expand);
        assert_eq!(result.thesis(), "do it: cache session tokens");
        assert!(result.perspectives().is_empty());
    }

    #[tokio::test]
    async fn test_multi_disciplinary_keeps_request_order() {
        let provider = Arc::new(MockProvider::new());
        let reasoner = DialecticalReasoner::new(provider.clone());
        let mode = ReasoningMode::multi_disciplinary(["usability", "security", "performance"]);

        let result = reasoner
            .evaluate(&change(), EdrrPhase::Differentiate, &mode)
            .await
            .unwrap();

        assert_eq!(
            result.discipline_labels(),
            vec!["usability", "security", "performance"]
        );
        assert_eq!(provider.asked.lock().unwrap().len(), 3);
        assert!(result.consensus_reached());
    }

    #[tokio::test]
    async fn test_single_discipline_is_padded() {
        let reasoner = DialecticalReasoner::new(Arc::new(MockProvider::new()));
        let mode = ReasoningMode::multi_disciplinary(["security"]);

        let result = reasoner
            .evaluate(&change(), EdrrPhase::Refine, &mode)
            .await
            .unwrap();

        assert!(result.discipline_labels().len() >= MIN_DISCIPLINES);
    }

    #[tokio::test]
    async fn test_conflict_fails_and_tags_retrospect() {
        let provider = MockProvider::new().with_conflict("security");
        let reasoner = DialecticalReasoner::new(Arc::new(provider));
        let mode = ReasoningMode::multi_disciplinary(["security", "performance"]);

        let result = reasoner
            .evaluate(&change(), EdrrPhase::Refine, &mode)
            .await
            .unwrap();

        assert!(!result.consensus_reached());
        assert_eq!(result.phase(), EdrrPhase::Retrospect);
        assert_eq!(result.attempted_in(), EdrrPhase::Refine);
        assert!(
            result
                .outcome()
                .failure_reason()
                .unwrap()
                .contains("security: irreconcilable")
        );
        // every perspective is attached, not just a summary
        assert_eq!(result.perspectives().len(), 2);
    }

    #[tokio::test]
    async fn test_failed_discipline_is_skipped() {
        let provider = MockProvider::new().with_failure("usability");
        let reasoner = DialecticalReasoner::new(Arc::new(provider));
        let mode = ReasoningMode::multi_disciplinary(["security", "usability", "performance"]);

        let result = reasoner
            .evaluate(&change(), EdrrPhase::Expand, &mode)
            .await
            .unwrap();

        assert_eq!(result.discipline_labels(), vec!["security", "performance"]);
    }

    #[tokio::test]
    async fn test_too_few_disciplines_is_error() {
        let provider = MockProvider::new().with_failure("performance");
        let reasoner = DialecticalReasoner::new(Arc::new(provider));
        let mode = ReasoningMode::multi_disciplinary(["security", "performance"]);

        let err = reasoner
            .evaluate(&change(), EdrrPhase::Expand, &mode)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ReasonerError::InsufficientPerspectives {
                required: 2,
                received: 1
            }
        ));
    }

    #[tokio::test]
    async fn test_provider_failure_propagates() {
        let reasoner = DialecticalReasoner::new(Arc::new(BrokenProvider));
        let err = reasoner
            .evaluate(&change(), EdrrPhase::Expand, &ReasoningMode::Dialectical)
            .await
            .unwrap_err();
        assert!(matches!(err, ReasonerError::Provider(ProviderError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_perspectives_attributed_to_team() {
        let reasoner = DialecticalReasoner::new(Arc::new(MockProvider::new()));
        let mode = ReasoningMode::multi_disciplinary(["security", "performance"]);
        let roles = RoleAssignment::for_phase(
            EdrrPhase::Expand,
            &[AgentProfile::new("lead"), AgentProfile::new("helper")],
        );

        let result = reasoner
            .evaluate_with_progress(&change(), EdrrPhase::Expand, &mode, &roles, &NoProgress)
            .await
            .unwrap();

        let agents: Vec<_> = result
            .perspectives()
            .iter()
            .map(|p| p.agent_id.as_deref().unwrap())
            .collect();
        assert_eq!(agents, vec!["helper", "lead"]);
    }
}
