//! Privilege relaunch as explicit state transitions.
//!
//! A relaunch is: persist the `force_admin` flag, ask the OS to start the
//! replacement process, then exit. The old process never waits for the new
//! one; the new one reads the flag on startup.

use std::path::Path;

use anyhow::Result;
use tracing::{info, warn};

use crate::panel::{ControlPanel, OverlaySurface};

/// What `main` should do before building any UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchDecision {
    /// Start normally in this process.
    Continue,
    /// Start an elevated copy and exit this one.
    RelaunchElevated,
}

/// Startup gate: an elevated run was requested but this process is not elevated.
pub fn decide_launch(force_admin: bool, is_elevated: bool) -> LaunchDecision {
    if force_admin && !is_elevated {
        LaunchDecision::RelaunchElevated
    } else {
        LaunchDecision::Continue
    }
}

/// Privilege level of the replacement process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relaunch {
    Elevated,
    Unelevated,
}

impl Relaunch {
    /// Value persisted as `force_admin` before relaunching.
    pub fn force_admin(self) -> bool {
        matches!(self, Relaunch::Elevated)
    }
}

/// Starts the replacement process.
pub trait ProcessLauncher {
    fn launch(&self, target: Relaunch) -> Result<()>;
}

/// Persist the flag for `target`, then launch. A failed save is logged and
/// the launch goes ahead. On `Ok` the caller exits without saving again. On
/// `Err` the previous flag is restored and re-saved, and the current process
/// should keep running.
pub fn perform_relaunch<O, L>(
    panel: &mut ControlPanel<O>,
    target: Relaunch,
    settings_path: &Path,
    launcher: &L,
) -> Result<()>
where
    O: OverlaySurface,
    L: ProcessLauncher + ?Sized,
{
    let previous = panel.force_admin();
    panel.set_force_admin(target.force_admin());
    if let Err(e) = panel.snapshot().save(settings_path) {
        warn!(error = %format!("{e:#}"), "Failed to persist settings before relaunch");
    }

    info!(?target, "Relaunching");
    if let Err(e) = launcher.launch(target) {
        warn!(?target, error = %format!("{e:#}"), "Relaunch failed, staying in this process");
        panel.set_force_admin(previous);
        panel.save_settings(settings_path);
        return Err(e);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_unelevated_forced_runs_relaunch() {
        assert_eq!(decide_launch(true, false), LaunchDecision::RelaunchElevated);
        assert_eq!(decide_launch(true, true), LaunchDecision::Continue);
        assert_eq!(decide_launch(false, false), LaunchDecision::Continue);
        assert_eq!(decide_launch(false, true), LaunchDecision::Continue);
    }

    #[test]
    fn relaunch_target_sets_flag() {
        assert!(Relaunch::Elevated.force_admin());
        assert!(!Relaunch::Unelevated.force_admin());
    }
}
