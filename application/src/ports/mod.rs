//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure and presentation
//! adapters must implement.

pub mod chat_reporter;
pub mod composite_chat;
pub mod progress;
pub mod reasoning_provider;
pub mod work_sink;
