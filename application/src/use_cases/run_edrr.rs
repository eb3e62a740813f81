//! Run EDRR use case
//!
//! Inbound API: submit a change, then advance its session phase by phase.
//! Sessions are independent; different sessions can advance concurrently
//! while the phases of a single session never interleave.

use super::coordinate_team::WsdeCoordinator;
use super::dialectical_reasoning::DialecticalReasoner;
use super::edrr_session::{EdrrSession, PhaseError, PhaseReport, PhaseStep, SessionDeps};
use super::tiered_memory::TieredMemoryManager;
use crate::config::EdrrConfig;
use crate::ports::chat_reporter::{ChatReporter, NoChatReporter};
use crate::ports::progress::{NoProgress, PhaseProgressNotifier};
use crate::ports::reasoning_provider::ReasoningProvider;
use edrr_domain::{EdrrPhase, RequirementChange, RoleAssignment};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};
use uuid::Uuid;

/// Opaque identifier of a running session
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionHandle(String);

impl SessionHandle {
    fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SessionHandle {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

type SharedSession<P> = Arc<Mutex<EdrrSession<P>>>;

/// Use case for running EDRR cycles
pub struct EdrrService<P: ReasoningProvider + 'static> {
    deps: SessionDeps<P>,
    config: EdrrConfig,
    sessions: RwLock<HashMap<SessionHandle, SharedSession<P>>>,
}

impl<P: ReasoningProvider + 'static> EdrrService<P> {
    pub fn new(provider: Arc<P>, memory: Arc<TieredMemoryManager>, config: EdrrConfig) -> Self {
        let reasoner = DialecticalReasoner::new(provider).with_policy(config.policy);
        Self {
            deps: SessionDeps {
                reasoner: Arc::new(reasoner),
                memory,
                chat: Arc::new(NoChatReporter),
                progress: Arc::new(NoProgress),
            },
            config,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub fn with_chat_reporter(mut self, chat: Arc<dyn ChatReporter>) -> Self {
        self.deps.chat = chat;
        self
    }

    pub fn with_progress(mut self, progress: Arc<dyn PhaseProgressNotifier>) -> Self {
        self.deps.progress = progress;
        self
    }

    pub fn memory(&self) -> &Arc<TieredMemoryManager> {
        &self.deps.memory
    }

    /// Open a session for `change` and run its EXPAND phase.
    pub async fn submit(&self, change: RequirementChange) -> Result<SessionHandle, PhaseError> {
        let coordinator =
            WsdeCoordinator::new(self.config.team.clone()).with_sink(self.deps.memory.clone());
        let mut session = EdrrSession::new(self.deps.clone(), coordinator, self.config.mode.clone());
        session.begin(change).await?;

        let handle = SessionHandle::generate();
        self.sessions
            .write()
            .await
            .insert(handle.clone(), Arc::new(Mutex::new(session)));
        info!(session = %handle, "Session opened");
        Ok(handle)
    }

    async fn session(&self, handle: &SessionHandle) -> Option<SharedSession<P>> {
        let session = self.sessions.read().await.get(handle).cloned();
        if session.is_none() {
            warn!(session = %handle, "Unknown session");
        }
        session
    }

    /// Advance one phase. Unknown handles are a logged no-op.
    pub async fn advance(&self, handle: &SessionHandle) -> Result<Option<PhaseStep>, PhaseError> {
        let Some(session) = self.session(handle).await else {
            return Ok(None);
        };
        let step = session.lock().await.advance().await?;
        Ok(Some(step))
    }

    /// Advance until RETROSPECT is recorded and return the full history.
    pub async fn run_to_completion(
        &self,
        handle: &SessionHandle,
    ) -> Result<Option<Vec<PhaseReport>>, PhaseError> {
        let Some(session) = self.session(handle).await else {
            return Ok(None);
        };
        let mut session = session.lock().await;
        while let PhaseStep::Entered(_) = session.advance().await? {}
        Ok(Some(session.history().to_vec()))
    }

    pub async fn current_phase(&self, handle: &SessionHandle) -> Option<EdrrPhase> {
        let session = self.session(handle).await?;
        session.lock().await.phase()
    }

    /// Roles of the session's current phase
    pub async fn role_assignment(&self, handle: &SessionHandle) -> Option<RoleAssignment> {
        let session = self.session(handle).await?;
        session.lock().await.role_assignment().cloned()
    }

    pub async fn history(&self, handle: &SessionHandle) -> Option<Vec<PhaseReport>> {
        let session = self.session(handle).await?;
        Some(session.lock().await.history().to_vec())
    }

    /// Forget a session. Its recorded phases stay in memory.
    pub async fn close(&self, handle: &SessionHandle) -> bool {
        let removed = self.sessions.write().await.remove(handle).is_some();
        if !removed {
            warn!(session = %handle, "Close requested for unknown session");
        }
        removed
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::edrr_session::tests::{MapStore, RecordingChat, ScriptedProvider, deps, team};
    use edrr_domain::{ChangeType, ReasoningMode, VectorStore};

    fn service(store: Arc<MapStore>) -> EdrrService<ScriptedProvider> {
        let memory = deps(store, Arc::new(NoChatReporter)).memory;
        let config = EdrrConfig::default()
            .with_team(team())
            .with_mode(ReasoningMode::multi_disciplinary(["security", "performance"]));
        EdrrService::new(Arc::new(ScriptedProvider), memory, config)
    }

    fn change(description: &str) -> RequirementChange {
        RequirementChange::new(ChangeType::Modify, description).unwrap()
    }

    #[tokio::test]
    async fn test_submit_enters_expand() {
        let service = service(Arc::new(MapStore::default()));
        let handle = service.submit(change("add audit log")).await.unwrap();

        assert_eq!(service.current_phase(&handle).await, Some(EdrrPhase::Expand));
        let roles = service.role_assignment(&handle).await.unwrap();
        assert_eq!(roles.phase, EdrrPhase::Expand);
        assert_eq!(roles.len(), 2);
        assert_eq!(service.history(&handle).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_advance_walks_the_cycle() {
        let service = service(Arc::new(MapStore::default()));
        let handle = service.submit(change("add audit log")).await.unwrap();

        for expected in [EdrrPhase::Differentiate, EdrrPhase::Refine, EdrrPhase::Retrospect] {
            match service.advance(&handle).await.unwrap() {
                Some(PhaseStep::Entered(report)) => assert_eq!(report.phase, expected),
                other => panic!("unexpected step: {:?}", other),
            }
        }
        assert_eq!(
            service.advance(&handle).await.unwrap(),
            Some(PhaseStep::CycleComplete)
        );
    }

    #[tokio::test]
    async fn test_unknown_handle_is_noop() {
        let service = service(Arc::new(MapStore::default()));
        let ghost = SessionHandle::from("ghost");

        assert_eq!(service.advance(&ghost).await.unwrap(), None);
        assert!(service.run_to_completion(&ghost).await.unwrap().is_none());
        assert_eq!(service.current_phase(&ghost).await, None);
        assert!(service.role_assignment(&ghost).await.is_none());
        assert!(!service.close(&ghost).await);
    }

    #[tokio::test]
    async fn test_run_to_completion_records_every_phase() {
        let store = Arc::new(MapStore::default());
        let service = service(store.clone());
        let handle = service.submit(change("add audit log")).await.unwrap();

        let history = service.run_to_completion(&handle).await.unwrap().unwrap();
        let phases: Vec<EdrrPhase> = history.iter().map(|r| r.phase).collect();
        assert_eq!(phases, EdrrPhase::ALL.to_vec());

        for report in &history {
            assert!(store.retrieve(&report.record_id).unwrap().is_some());
        }
        assert_eq!(
            service.memory().query_by_phase(EdrrPhase::Refine).unwrap().len(),
            1
        );
    }

    #[tokio::test]
    async fn test_sessions_are_independent() {
        let service = Arc::new(service(Arc::new(MapStore::default())));
        let a = service.submit(change("first change")).await.unwrap();
        let b = service.submit(change("second change")).await.unwrap();
        assert_ne!(a, b);

        let (ra, rb) = tokio::join!(service.run_to_completion(&a), service.run_to_completion(&b));
        assert_eq!(ra.unwrap().unwrap().len(), 4);
        assert_eq!(rb.unwrap().unwrap().len(), 4);
        assert_eq!(service.session_count().await, 2);

        assert!(service.close(&a).await);
        assert_eq!(service.session_count().await, 1);
        assert_eq!(service.current_phase(&b).await, Some(EdrrPhase::Retrospect));
    }

    #[tokio::test]
    async fn test_conflicting_change_persists_failure() {
        let store = Arc::new(MapStore::default());
        let chat = Arc::new(RecordingChat::default());
        let service = service(store.clone()).with_chat_reporter(chat.clone());

        let handle = service
            .submit(change("log tokens in plaintext"))
            .await
            .unwrap();
        let history = service.history(&handle).await.unwrap();
        let report = &history[0];

        assert!(!report.result.consensus_reached());
        let stored = store.retrieve(&report.record_id).unwrap().unwrap();
        assert_eq!(stored.phase, Some(EdrrPhase::Retrospect));
        assert!(!chat.messages.lock().unwrap()[0].consensus_reached);
    }
}
