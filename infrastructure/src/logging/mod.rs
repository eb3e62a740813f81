//! Logging infrastructure: structured reasoning transcripts.
//!
//! Provides [`JsonlChatReporter`], a JSONL file writer that implements
//! the [`ChatReporter`](edrr_application::ChatReporter) port.

mod jsonl_chat_reporter;

pub use jsonl_chat_reporter::JsonlChatReporter;
