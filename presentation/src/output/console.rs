//! Console output formatter for EDRR cycles

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use edrr_application::{PhaseReport, TierStats};
use edrr_domain::{ConsensusOutcome, OutputFormat};
use std::collections::BTreeMap;

/// Formats recorded phases for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Turn ANSI colors off for the rest of the process
    pub fn set_color(enabled: bool) {
        if !enabled {
            colored::control::set_override(false);
        }
    }

    /// Render in the requested format
    pub fn render(format: OutputFormat, reports: &[PhaseReport]) -> String {
        match format {
            OutputFormat::Full => Self::format(reports),
            OutputFormat::Synthesis => Self::format_synthesis_only(reports),
            OutputFormat::Json => Self::format_json(reports),
        }
    }

    /// Format every recorded phase
    pub fn format(reports: &[PhaseReport]) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("EDRR Council Results"));
        output.push('\n');

        if let Some(first) = reports.first() {
            output.push_str(&format!(
                "{} {}\n{} {}\n",
                "Change:".cyan().bold(),
                first.result.change_id(),
                "Mode:".cyan().bold(),
                first.result.mode()
            ));
        }

        for report in reports {
            let result = &report.result;
            output.push_str(&Self::section_header(&format!(
                "Phase {}: {}",
                result.attempted_in().ordinal() + 1,
                result.attempted_in().display_name()
            )));

            output.push_str(&format!("{} {}\n", "Roles:".dimmed(), report.roles));
            output.push_str(&format!(
                "\n{}\n{}\n",
                "── Thesis ──".yellow().bold(),
                result.thesis()
            ));
            output.push_str(&format!(
                "\n{}\n{}\n",
                "── Antithesis ──".yellow().bold(),
                result.antithesis()
            ));

            if !result.perspectives().is_empty() {
                output.push_str(&format!("\n{}\n", "── Perspectives ──".yellow().bold()));
                for p in result.perspectives() {
                    let agent = p.agent_id.as_deref().unwrap_or("-");
                    let marker = if p.is_conflicting() {
                        "x".red()
                    } else {
                        "v".green()
                    };
                    output.push_str(&format!(
                        "  {} [{}] {} ({:.2}): {}\n",
                        marker, p.discipline, agent, p.confidence, p.content
                    ));
                    if let Some(conflict) = &p.conflict {
                        output.push_str(&format!("      {} {}\n", "conflict:".red(), conflict));
                    }
                }
            }

            output.push_str(&format!(
                "\n{}\n{}\n",
                "── Synthesis ──".yellow().bold(),
                Self::indent(result.synthesis(), "  ")
            ));
            output.push_str(&format!("\n{}\n", Self::outcome_line(report)));
        }

        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(reports: &[PhaseReport]) -> String {
        serde_json::to_string_pretty(reports).unwrap_or_else(|_| "[]".to_string())
    }

    /// Format outcomes and the final synthesis only (concise output)
    pub fn format_synthesis_only(reports: &[PhaseReport]) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{}\n\n",
            "=== EDRR Council Conclusion ===".cyan().bold()
        ));

        for report in reports {
            output.push_str(&format!("{}\n", Self::outcome_line(report)));
        }

        if let Some(last) = reports.last() {
            output.push('\n');
            output.push_str(last.result.synthesis());
            output.push('\n');
        }

        output
    }

    /// Metrics counters and per-tier hit rates
    pub fn format_stats(metrics: &BTreeMap<String, u64>, tiers: &[TierStats]) -> String {
        let mut output = Self::section_header("Memory Statistics");
        for (key, count) in metrics {
            output.push_str(&format!("  {:<24} {}\n", key, count));
        }
        for tier in tiers {
            output.push_str(&format!(
                "  tier {:<19} hits {} / misses {} ({:.0}%)\n",
                tier.name,
                tier.hits,
                tier.misses,
                tier.hit_rate * 100.0
            ));
        }
        output
    }

    fn outcome_line(report: &PhaseReport) -> String {
        let result = &report.result;
        let phase = format!("[{}]", result.attempted_in());
        match result.outcome() {
            ConsensusOutcome::Reached { .. } => {
                format!("{} {}", phase.bold(), "consensus reached".green())
            }
            ConsensusOutcome::Failed { reason } => format!(
                "{} {} {} (recorded as {})",
                phase.bold(),
                "consensus failed:".red(),
                reason,
                result.phase()
            ),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, reports: &[PhaseReport]) -> String {
        Self::format(reports)
    }

    fn format_json(&self, reports: &[PhaseReport]) -> String {
        Self::format_json(reports)
    }

    fn format_synthesis_only(&self, reports: &[PhaseReport]) -> String {
        Self::format_synthesis_only(reports)
    }
}
