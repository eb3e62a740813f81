//! WSDE team coordination use case
//!
//! Owns one session's role assignments and its pending work queue.

use crate::ports::work_sink::WorkSink;
use edrr_domain::{AgentProfile, EdrrPhase, RoleAssignment, WorkItem};
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Assigns phase roles and buffers work until the next phase transition
pub struct WsdeCoordinator {
    team: Vec<AgentProfile>,
    assignment: Option<RoleAssignment>,
    pending: VecDeque<WorkItem>,
    sink: Option<Arc<dyn WorkSink>>,
}

impl WsdeCoordinator {
    pub fn new(team: Vec<AgentProfile>) -> Self {
        Self {
            team,
            assignment: None,
            pending: VecDeque::new(),
            sink: None,
        }
    }

    /// Forward drained work to `sink` instead of discarding it
    pub fn with_sink(mut self, sink: Arc<dyn WorkSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn team_ids(&self) -> Vec<String> {
        self.team.iter().map(|a| a.id.clone()).collect()
    }

    /// Assign roles for `phase` to the given agents.
    ///
    /// Agents without a configured profile have no expertise and rank
    /// last. Duplicate ids are ignored.
    pub fn assign_roles(&mut self, phase: EdrrPhase, agent_ids: &[String]) -> RoleAssignment {
        if agent_ids.is_empty() {
            warn!(phase = %phase, "Cannot assign roles: no agents in team");
        }

        let mut profiles: Vec<AgentProfile> = Vec::with_capacity(agent_ids.len());
        for id in agent_ids {
            if profiles.iter().any(|p| &p.id == id) {
                continue;
            }
            let profile = self
                .team
                .iter()
                .find(|p| &p.id == id)
                .cloned()
                .unwrap_or_else(|| AgentProfile::new(id.clone()));
            profiles.push(profile);
        }

        let assignment = RoleAssignment::for_phase(phase, &profiles);
        info!(
            phase = %phase,
            primus = assignment.primus().unwrap_or("-"),
            agents = assignment.len(),
            "Assigned roles"
        );
        self.assignment = Some(assignment.clone());
        assignment
    }

    pub fn enqueue(&mut self, item: WorkItem) {
        debug!(id = item.id.as_str(), phase = %item.phase, "Enqueued work item");
        self.pending.push_back(item);
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Move to `phase`: reassign roles for the whole team and drain the
    /// queue. The queue is empty when this returns.
    pub fn progress(&mut self, phase: EdrrPhase) -> RoleAssignment {
        let ids = self.team_ids();
        let assignment = self.assign_roles(phase, &ids);
        self.drain();
        assignment
    }

    /// Forward every pending item to the sink, or drop it when there is none.
    pub fn drain(&mut self) -> usize {
        let count = self.pending.len();
        for item in self.pending.drain(..) {
            match &self.sink {
                Some(sink) => sink.accept(item),
                None => debug!(id = item.id.as_str(), "Discarding work item: no sink attached"),
            }
        }
        count
    }

    /// Roles of the most recent assignment, if any
    pub fn current_assignment(&self) -> Option<&RoleAssignment> {
        self.assignment.as_ref()
    }

    /// Put back an earlier assignment after a phase failed to complete
    pub fn restore_assignment(&mut self, assignment: Option<RoleAssignment>) {
        self.assignment = assignment;
    }
}
