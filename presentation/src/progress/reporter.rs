//! Progress reporting for EDRR cycles

use colored::Colorize;
use edrr_application::PhaseProgressNotifier;
use edrr_domain::{EdrrPhase, RoleAssignment};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Reports progress with one spinner per phase
pub struct ProgressReporter {
    multi: MultiProgress,
    phase_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            phase_bar: Mutex::new(None),
        }
    }

    fn phase_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {pos} perspectives {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn phase_label(phase: EdrrPhase) -> String {
        format!("Phase {}: {}", phase.ordinal() + 1, phase.display_name())
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl PhaseProgressNotifier for ProgressReporter {
    fn on_phase_start(&self, phase: EdrrPhase, roles: &RoleAssignment) {
        let pb = self.multi.add(ProgressBar::new_spinner());
        pb.set_style(Self::phase_style());
        pb.set_prefix(Self::phase_label(phase));
        pb.set_message(format!("(primus: {})", roles.primus().unwrap_or("-")));
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut slot) = self.phase_bar.lock() {
            *slot = Some(pb);
        }
    }

    fn on_perspective(&self, _phase: EdrrPhase, discipline: &str, success: bool) {
        if let Ok(slot) = self.phase_bar.lock()
            && let Some(pb) = slot.as_ref()
        {
            let status = if success {
                format!("{} {}", "v".green(), discipline)
            } else {
                format!("{} {}", "x".red(), discipline)
            };
            pb.set_message(status);
            pb.inc(1);
        }
    }

    fn on_phase_complete(&self, phase: EdrrPhase, consensus_reached: bool) {
        if let Ok(mut slot) = self.phase_bar.lock()
            && let Some(pb) = slot.take()
        {
            let status = if consensus_reached {
                "consensus reached".green()
            } else {
                "consensus failed".red()
            };
            pb.finish_with_message(format!("{} {}", phase.display_name(), status));
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl PhaseProgressNotifier for SimpleProgress {
    fn on_phase_start(&self, phase: EdrrPhase, roles: &RoleAssignment) {
        println!(
            "{} {} ({} agents, primus: {})",
            "->".cyan(),
            ProgressReporter::phase_label(phase).bold(),
            roles.len(),
            roles.primus().unwrap_or("-")
        );
    }

    fn on_perspective(&self, _phase: EdrrPhase, discipline: &str, success: bool) {
        if success {
            println!("  {} {}", "v".green(), discipline);
        } else {
            println!("  {} {} (failed)", "x".red(), discipline);
        }
    }

    fn on_phase_complete(&self, _phase: EdrrPhase, consensus_reached: bool) {
        if !consensus_reached {
            println!("  {}", "no consensus, recorded under RETROSPECT".red());
        }
        println!();
    }

    fn on_cycle_complete(&self, change_id: &str) {
        println!("{} cycle complete for {}", "v".green(), change_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edrr_domain::AgentProfile;

    #[test]
    fn test_phase_label() {
        assert_eq!(
            ProgressReporter::phase_label(EdrrPhase::Refine),
            "Phase 3: Refine"
        );
    }

    #[test]
    fn test_reporter_lifecycle_without_terminal() {
        let reporter = ProgressReporter::new();
        let roles = RoleAssignment::for_phase(EdrrPhase::Expand, &[AgentProfile::new("a")]);

        reporter.on_phase_start(EdrrPhase::Expand, &roles);
        reporter.on_perspective(EdrrPhase::Expand, "security", true);
        assert!(reporter.phase_bar.lock().unwrap().is_some());

        reporter.on_phase_complete(EdrrPhase::Expand, true);
        assert!(reporter.phase_bar.lock().unwrap().is_none());
    }
}
