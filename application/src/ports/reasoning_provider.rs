//! Reasoning provider port
//!
//! Defines where thesis, antithesis, perspectives and synthesis come from.
//! The core decides how phases advance and how consensus is judged; the
//! provider decides what is actually said.

use async_trait::async_trait;
use edrr_domain::{EdrrPhase, Perspective, RequirementChange};
use thiserror::Error;

/// Errors that can occur while asking a provider for content
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider unavailable: {0}")]
    Unavailable(String),

    #[error("Unsupported discipline: {0}")]
    UnsupportedDiscipline(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),
}

/// Source of dialectical content
///
/// Implementations live in the infrastructure layer (or in tests).
#[async_trait]
pub trait ReasoningProvider: Send + Sync {
    /// Argue for the change
    async fn thesis(
        &self,
        change: &RequirementChange,
        phase: EdrrPhase,
    ) -> Result<String, ProviderError>;

    /// Argue against the thesis
    async fn antithesis(
        &self,
        change: &RequirementChange,
        phase: EdrrPhase,
        thesis: &str,
    ) -> Result<String, ProviderError>;

    /// Evaluate the change from one discipline's point of view
    async fn perspective(
        &self,
        change: &RequirementChange,
        phase: EdrrPhase,
        discipline: &str,
    ) -> Result<Perspective, ProviderError>;

    /// Reconcile thesis, antithesis and the collected perspectives
    async fn synthesis(
        &self,
        change: &RequirementChange,
        phase: EdrrPhase,
        thesis: &str,
        antithesis: &str,
        perspectives: &[Perspective],
    ) -> Result<String, ProviderError>;
}
