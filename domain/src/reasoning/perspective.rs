//! Perspective value object

use serde::{Deserialize, Serialize};

/// One discipline's evaluation of a change
///
/// # Example
///
/// ```
/// use edrr_domain::reasoning::Perspective;
///
/// let ok = Perspective::new("usability", "Flow stays familiar").with_confidence(1.4);
/// assert_eq!(ok.confidence, 1.0);
/// assert!(!ok.is_conflicting());
///
/// let veto = Perspective::new("security", "Tokens logged in plain text")
///     .with_conflict("credentials exposed");
/// assert!(veto.is_conflicting());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Perspective {
    /// Discipline label (e.g. "security", "performance")
    pub discipline: String,
    /// The evaluation itself
    pub content: String,
    /// Confidence level (0.0 to 1.0)
    pub confidence: f64,
    /// Set when the discipline considers the change irreconcilable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conflict: Option<String>,
    /// Agent that produced the perspective, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
}

impl Perspective {
    pub fn new(discipline: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            discipline: discipline.into(),
            content: content.into(),
            confidence: 1.0,
            conflict: None,
            agent_id: None,
        }
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = if confidence.is_nan() {
            0.0
        } else {
            confidence.clamp(0.0, 1.0)
        };
        self
    }

    /// Flag the change as irreconcilable from this discipline's view
    pub fn with_conflict(mut self, reason: impl Into<String>) -> Self {
        self.conflict = Some(reason.into());
        self
    }

    pub fn with_agent(mut self, agent_id: impl Into<String>) -> Self {
        self.agent_id = Some(agent_id.into());
        self
    }

    pub fn is_conflicting(&self) -> bool {
        self.conflict.is_some()
    }
}
