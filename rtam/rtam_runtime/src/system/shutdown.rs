//! Shutdown for the rtam runtime
//!
//! Terminates every live process when a manager is torn down.

use tracing::{info, warn};

use crate::lifecycle::LifecycleEngine;

/// Terminate every process, newest first. Returns the names of processes
/// that could not be terminated; their records stay in the table.
pub fn terminate_all(engine: &LifecycleEngine) -> Vec<&'static str> {
    info!("Terminating all applications");

    let names: Vec<&'static str> = engine.processes().iter().map(|p| p.name).collect();
    let mut remaining = Vec::new();

    for name in names {
        if let Err(err) = engine.terminate(name) {
            warn!(app = name, "Error terminating application: {}", err);
            remaining.push(name);
        }
    }

    if remaining.is_empty() {
        info!("All applications terminated");
    } else {
        warn!("{} applications still live after shutdown", remaining.len());
    }

    remaining
}
