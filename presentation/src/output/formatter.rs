//! Output formatter trait

use edrr_application::PhaseReport;

/// Trait for formatting the phases recorded for one change
pub trait OutputFormatter {
    /// Format every recorded phase
    fn format(&self, reports: &[PhaseReport]) -> String;

    /// Format as JSON
    fn format_json(&self, reports: &[PhaseReport]) -> String;

    /// Format outcomes and the final synthesis only (concise output)
    fn format_synthesis_only(&self, reports: &[PhaseReport]) -> String;
}
