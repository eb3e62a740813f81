//! Chat reporting
//!
//! Prints each recorded phase result as it happens.

mod console_reporter;

pub use console_reporter::ConsoleChatReporter;
