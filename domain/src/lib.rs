//! Domain layer for edrr-council
//!
//! This crate contains the core business logic, entities and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## EDRR
//!
//! Every submitted [`RequirementChange`] walks four phases strictly forward:
//! Expand, Differentiate, Refine, Retrospect. Each phase reassigns WSDE
//! roles ([`RoleAssignment`]) and produces one [`ReasoningResult`].
//!
//! ## Dialectical consensus
//!
//! A result holds thesis, antithesis, synthesis and the perspectives of
//! several disciplines. The [`ConsensusPolicy`] decides whether the
//! synthesis stands. A failed consensus is data, tagged RETROSPECT.
//!
//! ## Vector memory
//!
//! Results are persisted through the [`VectorStore`] contract as
//! phase-tagged [`MemoryVector`]s.

pub mod change;
pub mod config;
pub mod core;
pub mod edrr;
pub mod memory;
pub mod reasoning;
pub mod util;

// Re-export commonly used types
pub use change::{ChangeType, RequirementChange};
pub use config::OutputFormat;
pub use core::{error::DomainError, time::current_timestamp};
pub use edrr::{AgentProfile, EdrrPhase, Role, RoleAssignment, WorkItem};
pub use memory::{
    MemoryVector, MetricsRegistry, ScoredVector, StoreError, StoreStats, VectorStore,
    euclidean_distance, text_embedding,
};
pub use reasoning::{
    AgreementRule, ConsensusOutcome, ConsensusPolicy, Dialectic, Perspective, ReasoningMode,
    ReasoningResult,
};
