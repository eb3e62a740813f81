use colored::Colorize;
use edrr_application::{ChatMessage, ChatReporter};
use edrr_domain::util::preview;
use std::io::Write;

const SYNTHESIS_PREVIEW: usize = 100;

/// Chat reporter that prints one line per recorded phase to stderr
///
/// stderr keeps the lines out of JSON written to stdout.
#[derive(Debug, Default)]
pub struct ConsoleChatReporter;

impl ConsoleChatReporter {
    pub fn new() -> Self {
        Self
    }

    fn line(message: &ChatMessage) -> String {
        let phase = format!("[{}]", message.attempted_in);
        let lead = message.primus.as_deref().unwrap_or("-");
        match &message.failure_reason {
            None => format!(
                "{} {} {} {}",
                phase.bold(),
                lead.dimmed(),
                "agreed:".green(),
                preview(&message.synthesis, SYNTHESIS_PREVIEW)
            ),
            Some(reason) => format!(
                "{} {} {} {}",
                phase.bold(),
                lead.dimmed(),
                "no consensus:".red(),
                preview(reason, SYNTHESIS_PREVIEW)
            ),
        }
    }
}

impl ChatReporter for ConsoleChatReporter {
    fn display(&self, message: &ChatMessage) {
        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(stderr, "{}", Self::line(message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edrr_domain::EdrrPhase;

    #[test]
    fn test_line_mentions_outcome() {
        colored::control::set_override(false);
        let mut message = ChatMessage {
            change_id: "c".to_string(),
            phase: EdrrPhase::Expand,
            attempted_in: EdrrPhase::Expand,
            primus: Some("explorer".to_string()),
            consensus_reached: true,
            synthesis: "go ahead".to_string(),
            failure_reason: None,
            disciplines: vec![],
            record_id: "r".to_string(),
        };
        assert_eq!(
            ConsoleChatReporter::line(&message),
            "[EXPAND] explorer agreed: go ahead"
        );

        message.failure_reason = Some("security objects".to_string());
        assert!(ConsoleChatReporter::line(&message).ends_with("no consensus: security objects"));
    }
}
