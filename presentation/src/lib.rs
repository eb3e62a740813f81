//! Presentation layer for edrr-council
//!
//! This crate contains the CLI definition, output formatters,
//! progress reporters and the console chat reporter.

pub mod chat;
pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use chat::ConsoleChatReporter;
pub use cli::commands::{ChangeKind, Cli, OutputFormat};
pub use output::console::ConsoleFormatter;
pub use output::formatter::OutputFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
