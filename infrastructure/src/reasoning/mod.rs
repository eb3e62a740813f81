//! Reasoning providers
//!
//! Implementations of the [`ReasoningProvider`](edrr_application::ReasoningProvider) port.

mod heuristic_provider;
mod knowledge;

pub use heuristic_provider::HeuristicReasoningProvider;
pub use knowledge::DisciplineKnowledge;
