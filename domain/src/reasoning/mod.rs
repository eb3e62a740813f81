//! Dialectical reasoning domain
//!
//! A change is evaluated as thesis, antithesis and synthesis, optionally
//! enriched with [`Perspective`]s from several disciplines. Whether the
//! synthesis is accepted is decided by a [`ConsensusPolicy`]; a rejected
//! synthesis is still a regular [`ReasoningResult`] carrying a
//! [`ConsensusOutcome::Failed`].

pub mod mode;
pub mod outcome;
pub mod perspective;
pub mod policy;
pub mod result;
pub mod rule;

pub use mode::{DEFAULT_DISCIPLINES, MIN_DISCIPLINES, ReasoningMode};
pub use outcome::ConsensusOutcome;
pub use perspective::Perspective;
pub use policy::ConsensusPolicy;
pub use result::{Dialectic, ReasoningResult};
pub use rule::AgreementRule;
