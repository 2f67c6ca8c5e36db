//! System Bootstrap for the rtam runtime
//!
//! Runs the autostart sequence when a manager initializes.

use rtam_core::{Outcome, Result};
use tracing::{info, warn};

use crate::lifecycle::LifecycleEngine;

/// Result of launching one autostart application
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoStartReport {
    pub name: &'static str,
    pub outcome: Outcome,
}

/// Launch every application flagged for autostart, in registry order.
///
/// Ordering beyond registry order comes only from each launch resolving
/// its own required applications. Failures are logged and do not stop the
/// sequence.
pub fn launch_autostart(engine: &LifecycleEngine) -> Vec<AutoStartReport> {
    info!("Launching autostart applications");

    let mut reports = Vec::new();
    for app in engine.registry().iter().filter(|app| app.is_auto_start()) {
        let result: Result<()> = engine.launch(app.name);
        let outcome = Outcome::from(&result);

        match result {
            Ok(()) => info!(app = app.name, "autostarted"),
            Err(err) if outcome == Outcome::NotSupported => {
                info!(app = app.name, "autostarted: {}", err)
            }
            Err(err) => warn!(app = app.name, "autostart failed: {}", err),
        }

        reports.push(AutoStartReport {
            name: app.name,
            outcome,
        });
    }

    info!("Autostart complete, {} applications launched", reports.len());

    reports
}
