//! Composite chat reporter: delegates to multiple reporters.
//!
//! Used to send every phase result to both the console and the JSONL
//! transcript.
//!
//! ```text
//! EdrrSession ──display──▶ CompositeChatReporter
//!                              ├──▶ ConsoleChatReporter
//!                              └──▶ JsonlChatReporter
//! ```

use super::chat_reporter::{ChatMessage, ChatReporter};
use std::sync::Arc;

/// A chat reporter that hands each message to every delegate, in order.
#[derive(Default)]
pub struct CompositeChatReporter {
    delegates: Vec<Arc<dyn ChatReporter>>,
}

impl CompositeChatReporter {
    pub fn new(delegates: Vec<Arc<dyn ChatReporter>>) -> Self {
        Self { delegates }
    }

    pub fn with(mut self, reporter: Arc<dyn ChatReporter>) -> Self {
        self.delegates.push(reporter);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.delegates.is_empty()
    }
}

impl ChatReporter for CompositeChatReporter {
    fn display(&self, message: &ChatMessage) {
        for d in &self.delegates {
            d.display(message);
        }
    }
}
