//! Progress notification port
//!
//! Defines the interface for reporting progress while an EDRR cycle runs.

use edrr_domain::{EdrrPhase, RoleAssignment};

/// Callback for progress updates during an EDRR cycle
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (spinner, plain log lines, etc.)
pub trait PhaseProgressNotifier: Send + Sync {
    /// Called when a phase starts, after roles have been assigned
    fn on_phase_start(&self, phase: EdrrPhase, roles: &RoleAssignment);

    /// Called when one discipline's perspective has been requested
    fn on_perspective(&self, _phase: EdrrPhase, _discipline: &str, _success: bool) {}

    /// Called when the phase result has been recorded
    fn on_phase_complete(&self, phase: EdrrPhase, consensus_reached: bool);

    /// Called once RETROSPECT has been recorded for a change
    fn on_cycle_complete(&self, _change_id: &str) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl PhaseProgressNotifier for NoProgress {
    fn on_phase_start(&self, _phase: EdrrPhase, _roles: &RoleAssignment) {}
    fn on_phase_complete(&self, _phase: EdrrPhase, _consensus_reached: bool) {}
}
