//! Offline reasoning provider
//!
//! Produces deterministic dialectical content from the change description
//! and a small table of per-discipline knowledge. Useful for demos, tests
//! and running the council without a model backend.

use super::knowledge::DisciplineKnowledge;
use async_trait::async_trait;
use edrr_application::{ProviderError, ReasoningProvider};
use edrr_domain::util::preview;
use edrr_domain::{ChangeType, EdrrPhase, Perspective, RequirementChange};
use tracing::debug;

const PREVIEW_CHARS: usize = 80;

/// Keyword-driven [`ReasoningProvider`]
///
/// A discipline objects (flags a conflict) when the description mentions
/// one of its red-flag terms. Confidence grows with the number of the
/// discipline's strengths the description mentions.
#[derive(Debug, Clone, Default)]
pub struct HeuristicReasoningProvider;

impl HeuristicReasoningProvider {
    pub fn new() -> Self {
        Self
    }

    fn phase_focus(phase: EdrrPhase) -> &'static str {
        match phase {
            EdrrPhase::Expand => "explore alternatives and affected areas",
            EdrrPhase::Differentiate => "compare the options and pick the strongest",
            EdrrPhase::Refine => "tighten the chosen approach into concrete steps",
            EdrrPhase::Retrospect => "review what the cycle learned",
        }
    }

    fn risk(change_type: ChangeType) -> &'static str {
        match change_type {
            ChangeType::Add => "it adds surface area that must be tested and maintained",
            ChangeType::Modify => "it may break callers that rely on current behaviour",
            ChangeType::Remove => "it may strand dependents that still use the feature",
        }
    }
}

#[async_trait]
impl ReasoningProvider for HeuristicReasoningProvider {
    async fn thesis(
        &self,
        change: &RequirementChange,
        phase: EdrrPhase,
    ) -> Result<String, ProviderError> {
        Ok(format!(
            "{} the requirement \"{}\"; in {} we {}.",
            change.change_type(),
            preview(change.description(), PREVIEW_CHARS),
            phase.display_name(),
            Self::phase_focus(phase)
        ))
    }

    async fn antithesis(
        &self,
        change: &RequirementChange,
        _phase: EdrrPhase,
        _thesis: &str,
    ) -> Result<String, ProviderError> {
        Ok(format!("Caution: {}.", Self::risk(change.change_type())))
    }

    async fn perspective(
        &self,
        change: &RequirementChange,
        phase: EdrrPhase,
        discipline: &str,
    ) -> Result<Perspective, ProviderError> {
        let discipline = discipline.trim();
        if discipline.is_empty() {
            return Err(ProviderError::UnsupportedDiscipline(
                "empty discipline".to_string(),
            ));
        }

        let text = change.description().to_lowercase();
        let knowledge = DisciplineKnowledge::lookup(discipline);
        let strengths = knowledge.strengths_in(&text);
        let missing = knowledge.missing_practices(&text);

        let mut content = format!("{} view during {}:", discipline, phase.display_name());
        if strengths.is_empty() {
            content.push_str(" no specific strengths noted");
        } else {
            content.push_str(&format!(" addresses {}", strengths.join(", ")));
        }
        if !missing.is_empty() {
            content.push_str(&format!("; recommend {}", missing.join(", ")));
        }

        let confidence = 0.6 + 0.1 * strengths.len().min(3) as f64;
        let mut perspective = Perspective::new(discipline, content).with_confidence(confidence);
        if let Some(reason) = knowledge.red_flag(&text) {
            debug!(discipline, reason, "Discipline objects to change");
            perspective = perspective.with_conflict(reason);
        }
        Ok(perspective)
    }

    async fn synthesis(
        &self,
        change: &RequirementChange,
        phase: EdrrPhase,
        _thesis: &str,
        antithesis: &str,
        perspectives: &[Perspective],
    ) -> Result<String, ProviderError> {
        let mut synthesis = format!(
            "Proceed with {} \"{}\" in {}, mitigating: {}",
            change.change_type(),
            preview(change.description(), PREVIEW_CHARS),
            phase.display_name(),
            antithesis.trim_start_matches("Caution: ")
        );

        let objections: Vec<String> = perspectives
            .iter()
            .filter_map(|p| {
                p.conflict
                    .as_ref()
                    .map(|c| format!("{} ({})", p.discipline, c))
            })
            .collect();
        if !objections.is_empty() {
            synthesis.push_str(&format!(" Unresolved: {}.", objections.join("; ")));
        }
        Ok(synthesis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn change(change_type: ChangeType, description: &str) -> RequirementChange {
        RequirementChange::new(change_type, description).unwrap()
    }

    #[tokio::test]
    async fn test_thesis_and_antithesis_follow_change() {
        let provider = HeuristicReasoningProvider::new();
        let change = change(ChangeType::Remove, "drop the legacy export");

        let thesis = provider.thesis(&change, EdrrPhase::Expand).await.unwrap();
        assert!(thesis.starts_with("REMOVE"));
        assert!(thesis.contains("drop the legacy export"));

        let antithesis = provider
            .antithesis(&change, EdrrPhase::Expand, &thesis)
            .await
            .unwrap();
        assert!(antithesis.contains("strand dependents"));
    }

    #[tokio::test]
    async fn test_red_flag_produces_conflict() {
        let provider = HeuristicReasoningProvider::new();
        let change = change(ChangeType::Add, "Log session tokens in plaintext");

        let security = provider
            .perspective(&change, EdrrPhase::Differentiate, "security")
            .await
            .unwrap();
        assert!(security.is_conflicting());
        assert_eq!(security.discipline, "security");

        let performance = provider
            .perspective(&change, EdrrPhase::Differentiate, "performance")
            .await
            .unwrap();
        assert!(!performance.is_conflicting());
    }

    #[tokio::test]
    async fn test_confidence_grows_with_strengths() {
        let provider = HeuristicReasoningProvider::new();
        let plain = change(ChangeType::Modify, "rename the settings page");
        let strong = change(ChangeType::Modify, "cache and batch index lookups");

        let low = provider
            .perspective(&plain, EdrrPhase::Refine, "performance")
            .await
            .unwrap();
        let high = provider
            .perspective(&strong, EdrrPhase::Refine, "performance")
            .await
            .unwrap();
        assert!(high.confidence > low.confidence);
        assert!(high.confidence <= 1.0);
    }

    #[tokio::test]
    async fn test_empty_discipline_is_rejected() {
        let provider = HeuristicReasoningProvider::new();
        let result = provider
            .perspective(&change(ChangeType::Add, "x"), EdrrPhase::Expand, "  ")
            .await;
        assert!(matches!(
            result,
            Err(ProviderError::UnsupportedDiscipline(_))
        ));
    }

    #[tokio::test]
    async fn test_synthesis_lists_objections() {
        let provider = HeuristicReasoningProvider::new();
        let change = change(ChangeType::Add, "store passwords in plaintext");
        let perspectives = vec![
            Perspective::new("security", "no").with_conflict("plaintext secrets"),
            Perspective::new("usability", "fine"),
        ];

        let synthesis = provider
            .synthesis(&change, EdrrPhase::Refine, "t", "Caution: risky.", &perspectives)
            .await
            .unwrap();
        assert!(synthesis.contains("mitigating: risky."));
        assert!(synthesis.contains("security (plaintext secrets)"));
        assert!(!synthesis.contains("usability ("));
    }

    #[tokio::test]
    async fn test_conflicting_change_is_persisted_to_file_memory() {
        use crate::vector::JsonFileVectorStore;
        use edrr_application::{EdrrConfig, EdrrService, MemoryParams, MemoryTier, TieredMemoryManager};
        use edrr_domain::{AgentProfile, MetricsRegistry, ReasoningMode, VectorStore};
        use std::sync::Arc;

        let dir = tempfile::tempdir().unwrap();
        let metrics = Arc::new(MetricsRegistry::new());
        let store = Arc::new(
            JsonFileVectorStore::open(dir.path().join("edrr.json"), "edrr", Some(5), metrics.clone())
                .unwrap(),
        );
        let memory = Arc::new(
            TieredMemoryManager::new(
                vec![MemoryTier::new("archive", store.clone())],
                MemoryParams::default(),
                metrics,
            )
            .unwrap(),
        );
        let config = EdrrConfig::default()
            .with_team(vec![
                AgentProfile::new("explorer").with_expertise(["research"]),
                AgentProfile::new("analyst").with_expertise(["analysis"]),
            ])
            .with_mode(ReasoningMode::multi_disciplinary(["security", "performance"]));
        let service = EdrrService::new(Arc::new(HeuristicReasoningProvider::new()), memory, config);

        let handle = service
            .submit(change(ChangeType::Add, "Write session tokens to the log in plaintext"))
            .await
            .unwrap();
        let history = service.run_to_completion(&handle).await.unwrap().unwrap();

        assert_eq!(history.len(), 4);
        for report in &history {
            assert!(!report.result.consensus_reached());
            let stored = store.retrieve(&report.record_id).unwrap().unwrap();
            assert_eq!(stored.phase, Some(EdrrPhase::Retrospect));
        }
        assert_eq!(history[1].result.attempted_in(), EdrrPhase::Differentiate);
    }
}
