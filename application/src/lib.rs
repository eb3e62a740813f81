//! Application layer for edrr-council
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{EdrrConfig, MemoryParams};
pub use ports::{
    chat_reporter::{ChatMessage, ChatReporter, NoChatReporter},
    composite_chat::CompositeChatReporter,
    progress::{NoProgress, PhaseProgressNotifier},
    reasoning_provider::{ProviderError, ReasoningProvider},
    work_sink::WorkSink,
};
pub use use_cases::coordinate_team::WsdeCoordinator;
pub use use_cases::dialectical_reasoning::{DialecticalReasoner, ReasonerError};
pub use use_cases::edrr_session::{EdrrSession, PhaseError, PhaseReport, PhaseStep, SessionDeps};
pub use use_cases::run_edrr::{EdrrService, SessionHandle};
pub use use_cases::tiered_memory::{MemoryError, MemoryTier, TierStats, TieredMemoryManager};
