//! WSDE role value object

use super::phase::EdrrPhase;
use serde::{Deserialize, Serialize};

/// Role an agent plays in a WSDE team
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Leads the phase and owns the final synthesis
    Primus,
    /// Produces the bulk of the work
    Worker,
    /// Plans structure and alternatives
    Designer,
    /// Watches process and quality
    Supervisor,
    /// Judges candidate outcomes
    Evaluator,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Primus => "primus",
            Role::Worker => "worker",
            Role::Designer => "designer",
            Role::Supervisor => "supervisor",
            Role::Evaluator => "evaluator",
        }
    }

    /// Order in which roles are handed out to agents ranked by expertise.
    ///
    /// The best-ranked agent always becomes Primus; the rest of the order
    /// depends on what the phase values most.
    pub fn order_for(phase: EdrrPhase) -> [Role; 5] {
        match phase {
            EdrrPhase::Expand => [
                Role::Primus,
                Role::Worker,
                Role::Designer,
                Role::Supervisor,
                Role::Evaluator,
            ],
            EdrrPhase::Differentiate => [
                Role::Primus,
                Role::Evaluator,
                Role::Supervisor,
                Role::Worker,
                Role::Designer,
            ],
            EdrrPhase::Refine => [
                Role::Primus,
                Role::Worker,
                Role::Designer,
                Role::Evaluator,
                Role::Supervisor,
            ],
            EdrrPhase::Retrospect => [
                Role::Primus,
                Role::Evaluator,
                Role::Supervisor,
                Role::Designer,
                Role::Worker,
            ],
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_primus_always_first() {
        for phase in EdrrPhase::ALL {
            assert_eq!(Role::order_for(phase)[0], Role::Primus);
        }
    }

    #[test]
    fn test_each_order_is_a_permutation() {
        for phase in EdrrPhase::ALL {
            let unique: HashSet<Role> = Role::order_for(phase).into_iter().collect();
            assert_eq!(unique.len(), 5);
        }
    }

    #[test]
    fn test_differentiate_prefers_evaluator() {
        assert_eq!(Role::order_for(EdrrPhase::Differentiate)[1], Role::Evaluator);
        assert_eq!(Role::order_for(EdrrPhase::Expand)[1], Role::Worker);
    }
}
