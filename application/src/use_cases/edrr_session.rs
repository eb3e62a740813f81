//! EDRR phase controller
//!
//! One [`EdrrSession`] drives one change through the cycle. Entering a
//! phase runs, in order:
//!
//! 1. coordinator `progress(phase)`, then memory `flush_pending()`
//! 2. reasoner `evaluate` while the change is pending
//! 3. memory `record(phase, result)`, phase summary enqueued for the next
//!    transition, chat reporter and progress notifier informed
//!
//! A phase that fails before its result is recorded leaves the session as
//! it was: same phase, same roles, same pending change.

use super::coordinate_team::WsdeCoordinator;
use super::dialectical_reasoning::{DialecticalReasoner, ReasonerError};
use super::tiered_memory::{MemoryError, TieredMemoryManager};
use crate::ports::chat_reporter::{ChatMessage, ChatReporter};
use crate::ports::progress::PhaseProgressNotifier;
use crate::ports::reasoning_provider::ReasoningProvider;
use edrr_domain::{
    EdrrPhase, ReasoningMode, ReasoningResult, RequirementChange, RoleAssignment, WorkItem,
};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur while driving a session
#[derive(Error, Debug)]
pub enum PhaseError {
    #[error("A cycle is already in progress (current phase: {0})")]
    CycleInProgress(EdrrPhase),

    #[error("No change has been submitted to this session")]
    NotStarted,

    #[error("Reasoning failed: {0}")]
    Reasoner(#[from] ReasonerError),

    #[error("Memory error: {0}")]
    Memory(#[from] MemoryError),
}

/// What happened when a phase was entered
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseReport {
    pub phase: EdrrPhase,
    pub roles: RoleAssignment,
    pub result: ReasoningResult,
    pub record_id: String,
}

/// Outcome of [`EdrrSession::advance`]
#[derive(Debug, Clone, PartialEq)]
pub enum PhaseStep {
    Entered(Box<PhaseReport>),
    /// RETROSPECT was already recorded; a new change starts the next cycle
    CycleComplete,
}

/// Collaborators shared by every session
pub struct SessionDeps<P: ReasoningProvider + 'static> {
    pub reasoner: Arc<DialecticalReasoner<P>>,
    pub memory: Arc<TieredMemoryManager>,
    pub chat: Arc<dyn ChatReporter>,
    pub progress: Arc<dyn PhaseProgressNotifier>,
}

impl<P: ReasoningProvider + 'static> Clone for SessionDeps<P> {
    fn clone(&self) -> Self {
        Self {
            reasoner: Arc::clone(&self.reasoner),
            memory: Arc::clone(&self.memory),
            chat: Arc::clone(&self.chat),
            progress: Arc::clone(&self.progress),
        }
    }
}

/// Phase state machine for one change at a time
pub struct EdrrSession<P: ReasoningProvider + 'static> {
    deps: SessionDeps<P>,
    coordinator: WsdeCoordinator,
    mode: ReasoningMode,
    phase: Option<EdrrPhase>,
    change: Option<RequirementChange>,
    history: Vec<PhaseReport>,
}

impl<P: ReasoningProvider + 'static> EdrrSession<P> {
    pub fn new(deps: SessionDeps<P>, coordinator: WsdeCoordinator, mode: ReasoningMode) -> Self {
        Self {
            deps,
            coordinator,
            mode,
            phase: None,
            change: None,
            history: Vec::new(),
        }
    }

    /// Current phase; `None` before the first change
    pub fn phase(&self) -> Option<EdrrPhase> {
        self.phase
    }

    pub fn role_assignment(&self) -> Option<&RoleAssignment> {
        self.coordinator.current_assignment()
    }

    pub fn history(&self) -> &[PhaseReport] {
        &self.history
    }

    pub fn is_cycle_complete(&self) -> bool {
        self.phase == Some(EdrrPhase::Retrospect) && self.change.is_none()
    }

    /// Start a cycle for `change` by entering EXPAND.
    pub async fn begin(&mut self, change: RequirementChange) -> Result<PhaseReport, PhaseError> {
        if let Some(phase) = self.phase
            && !self.is_cycle_complete()
        {
            return Err(PhaseError::CycleInProgress(phase));
        }

        info!(change_id = change.id(), change = %change, "Starting EDRR cycle");
        let previous = self.change.replace(change);
        let entered = self.enter(EdrrPhase::Expand).await;
        if entered.is_err() {
            self.change = previous;
        }
        entered
    }

    /// Move to the next phase.
    ///
    /// Deterministic: EXPAND → DIFFERENTIATE → REFINE → RETROSPECT. Once
    /// RETROSPECT is recorded this returns [`PhaseStep::CycleComplete`]
    /// without side effects.
    pub async fn advance(&mut self) -> Result<PhaseStep, PhaseError> {
        let current = self.phase.ok_or(PhaseError::NotStarted)?;
        match current.next() {
            Some(next) => Ok(PhaseStep::Entered(Box::new(self.enter(next).await?))),
            None => {
                debug!("Cycle already complete; nothing to advance");
                Ok(PhaseStep::CycleComplete)
            }
        }
    }

    async fn enter(&mut self, phase: EdrrPhase) -> Result<PhaseReport, PhaseError> {
        let previous_roles = self.coordinator.current_assignment().cloned();
        let entered = self.run_phase(phase).await;
        if let Err(e) = &entered {
            warn!(phase = %phase, error = %e, "Phase failed, keeping previous state");
            self.coordinator.restore_assignment(previous_roles);
        }
        entered
    }

    async fn run_phase(&mut self, phase: EdrrPhase) -> Result<PhaseReport, PhaseError> {
        info!(from = ?self.phase, to = %phase, "Entering phase");

        let roles = self.coordinator.progress(phase);
        self.deps.memory.flush_pending()?;
        self.deps.progress.on_phase_start(phase, &roles);

        let change = self.change.clone().ok_or(PhaseError::NotStarted)?;
        let result = self
            .deps
            .reasoner
            .evaluate_with_progress(&change, phase, &self.mode, &roles, self.deps.progress.as_ref())
            .await?;

        let record_id = self.deps.memory.record(phase, &result)?;
        self.phase = Some(phase);

        self.coordinator.enqueue(
            WorkItem::new(
                phase,
                format!("{} summary for {}: {}", phase, change.id(), result.outcome()),
            )
            .with_payload(serde_json::json!({
                "change_id": change.id(),
                "record_id": record_id,
                "consensus": result.consensus_reached(),
            })),
        );

        self.deps
            .chat
            .display(&ChatMessage::from_result(&result, &roles, &record_id));
        self.deps
            .progress
            .on_phase_complete(phase, result.consensus_reached());

        if phase.is_terminal() {
            self.finish_cycle(&change);
        }

        let report = PhaseReport {
            phase,
            roles,
            result,
            record_id,
        };
        self.history.push(report.clone());
        Ok(report)
    }

    /// RETROSPECT is already recorded here, so a failed flush only leaves
    /// the summaries buffered for the next transition.
    fn finish_cycle(&mut self, change: &RequirementChange) {
        self.change = None;
        self.coordinator.drain();
        if let Err(e) = self.deps.memory.flush_pending() {
            warn!(change_id = change.id(), error = %e, "Phase summaries stay buffered");
        }
        self.deps.progress.on_cycle_complete(change.id());
        info!(change_id = change.id(), "EDRR cycle complete");
    }
}
