//! Agent profiles and phase role assignments

use super::phase::EdrrPhase;
use super::role::Role;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A team member and the expertise it advertises
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentProfile {
    pub id: String,
    #[serde(default)]
    pub expertise: Vec<String>,
}

impl AgentProfile {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            expertise: Vec::new(),
        }
    }

    pub fn with_expertise<I, S>(mut self, expertise: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.expertise = expertise.into_iter().map(Into::into).collect();
        self
    }

    /// How well this agent's expertise matches the phase keywords.
    ///
    /// One point per (expertise, keyword) pair where either string
    /// contains the other, case-insensitive.
    pub fn phase_score(&self, phase: EdrrPhase) -> usize {
        let keywords = phase.expertise_keywords();
        self.expertise
            .iter()
            .map(|e| e.trim().to_lowercase())
            .filter(|e| !e.is_empty())
            .map(|e| {
                keywords
                    .iter()
                    .filter(|k| e.contains(*k) || k.contains(e.as_str()))
                    .count()
            })
            .sum()
    }
}

/// Which role each agent holds during a phase
///
/// Keyed by agent id so the assignment is directly queryable and
/// serializes in a stable order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoleAssignment {
    pub phase: EdrrPhase,
    pub roles: BTreeMap<String, Role>,
}

impl RoleAssignment {
    pub fn empty(phase: EdrrPhase) -> Self {
        Self {
            phase,
            roles: BTreeMap::new(),
        }
    }

    /// Rank agents for `phase` and hand out roles in the phase's order.
    ///
    /// The sort is stable, so agents with equal scores keep the order they
    /// were given in. Agents beyond the five WSDE roles become workers.
    pub fn for_phase(phase: EdrrPhase, agents: &[AgentProfile]) -> Self {
        let mut ranked: Vec<(&AgentProfile, usize)> =
            agents.iter().map(|a| (a, a.phase_score(phase))).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));

        let order = Role::order_for(phase);
        let mut roles = BTreeMap::new();
        for (i, (agent, _)) in ranked.into_iter().enumerate() {
            let role = order.get(i).copied().unwrap_or(Role::Worker);
            roles.entry(agent.id.clone()).or_insert(role);
        }

        Self { phase, roles }
    }

    pub fn role_of(&self, agent_id: &str) -> Option<Role> {
        self.roles.get(agent_id).copied()
    }

    /// Agent currently holding the Primus role
    pub fn primus(&self) -> Option<&str> {
        self.agents_with(Role::Primus).into_iter().next()
    }

    pub fn agents_with(&self, role: Role) -> Vec<&str> {
        self.roles
            .iter()
            .filter(|(_, r)| **r == role)
            .map(|(id, _)| id.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

impl std::fmt::Display for RoleAssignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .roles
            .iter()
            .map(|(id, role)| format!("{}={}", id, role))
            .collect();
        write!(f, "{}: {}", self.phase, parts.join(", "))
    }
}
