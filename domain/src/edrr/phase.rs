//! EDRR phase value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Phase of an EDRR cycle
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EdrrPhase {
    /// Divergent exploration of the change
    #[default]
    Expand,
    /// Analysis and comparison of the alternatives
    Differentiate,
    /// Convergence on a refined proposal
    Refine,
    /// Review of the cycle; also the tag for failed consensus records
    Retrospect,
}

impl EdrrPhase {
    /// All phases in cycle order
    pub const ALL: [EdrrPhase; 4] = [
        EdrrPhase::Expand,
        EdrrPhase::Differentiate,
        EdrrPhase::Refine,
        EdrrPhase::Retrospect,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EdrrPhase::Expand => "EXPAND",
            EdrrPhase::Differentiate => "DIFFERENTIATE",
            EdrrPhase::Refine => "REFINE",
            EdrrPhase::Retrospect => "RETROSPECT",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            EdrrPhase::Expand => "Expand",
            EdrrPhase::Differentiate => "Differentiate",
            EdrrPhase::Refine => "Refine",
            EdrrPhase::Retrospect => "Retrospect",
        }
    }

    /// Zero-based position in the cycle
    pub fn ordinal(&self) -> usize {
        match self {
            EdrrPhase::Expand => 0,
            EdrrPhase::Differentiate => 1,
            EdrrPhase::Refine => 2,
            EdrrPhase::Retrospect => 3,
        }
    }

    /// The following phase within the same cycle.
    ///
    /// Returns `None` at RETROSPECT: a new cycle only starts when a new
    /// change is submitted.
    pub fn next(&self) -> Option<EdrrPhase> {
        match self {
            EdrrPhase::Expand => Some(EdrrPhase::Differentiate),
            EdrrPhase::Differentiate => Some(EdrrPhase::Refine),
            EdrrPhase::Refine => Some(EdrrPhase::Retrospect),
            EdrrPhase::Retrospect => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, EdrrPhase::Retrospect)
    }

    /// Expertise keywords that make an agent a good lead for this phase
    pub fn expertise_keywords(&self) -> &'static [&'static str] {
        match self {
            EdrrPhase::Expand => &[
                "exploration",
                "brainstorming",
                "divergent thinking",
                "idea generation",
                "research",
                "discovery",
                "creativity",
                "innovation",
                "alternatives",
            ],
            EdrrPhase::Differentiate => &[
                "analysis",
                "comparison",
                "categorization",
                "classification",
                "evaluation",
                "assessment",
                "critical thinking",
                "judgment",
            ],
            EdrrPhase::Refine => &[
                "refinement",
                "improvement",
                "optimization",
                "editing",
                "revision",
                "detail-oriented",
                "precision",
                "quality control",
            ],
            EdrrPhase::Retrospect => &[
                "reflection",
                "retrospective",
                "review",
                "learning",
                "insight",
                "metacognition",
                "introspection",
            ],
        }
    }
}

impl std::fmt::Display for EdrrPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for EdrrPhase {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "expand" => Ok(EdrrPhase::Expand),
            "differentiate" => Ok(EdrrPhase::Differentiate),
            "refine" => Ok(EdrrPhase::Refine),
            "retrospect" | "reflect" => Ok(EdrrPhase::Retrospect),
            other => Err(DomainError::UnknownPhase(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_is_strictly_forward() {
        assert_eq!(EdrrPhase::Expand.next(), Some(EdrrPhase::Differentiate));
        assert_eq!(EdrrPhase::Differentiate.next(), Some(EdrrPhase::Refine));
        assert_eq!(EdrrPhase::Refine.next(), Some(EdrrPhase::Retrospect));
        assert_eq!(EdrrPhase::Retrospect.next(), None);
    }

    #[test]
    fn test_ordinal_matches_all_order() {
        for (i, phase) in EdrrPhase::ALL.iter().enumerate() {
            assert_eq!(phase.ordinal(), i);
        }
    }

    #[test]
    fn test_parse_accepts_reflect_alias() {
        assert_eq!(
            "reflect".parse::<EdrrPhase>().unwrap(),
            EdrrPhase::Retrospect
        );
        assert_eq!("REFINE".parse::<EdrrPhase>().unwrap(), EdrrPhase::Refine);
        assert!("review".parse::<EdrrPhase>().is_err());
    }

    #[test]
    fn test_serde_uses_enum_strings() {
        let json = serde_json::to_string(&EdrrPhase::Differentiate).unwrap();
        assert_eq!(json, "\"DIFFERENTIATE\"");
        let phase: EdrrPhase = serde_json::from_str("\"RETROSPECT\"").unwrap();
        assert_eq!(phase, EdrrPhase::Retrospect);
    }

    #[test]
    fn test_every_phase_has_keywords() {
        for phase in EdrrPhase::ALL {
            assert!(!phase.expertise_keywords().is_empty());
        }
    }
}
