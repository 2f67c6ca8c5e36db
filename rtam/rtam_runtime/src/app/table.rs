//! Process Table
//!
//! One record per application that has been launched and not yet fully
//! terminated. Records are inserted at the front, so iteration yields the
//! most recently created process first.
//!
//! The table is not synchronized on its own; the lifecycle engine keeps it
//! behind a mutex.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use rtam_core::{AppDescriptor, LifecycleError, ProcessState, Result, StatusMask};
use serde::Serialize;
use tracing::{debug, trace};

use super::registry::AppRegistry;

/// Runtime record of one application
#[derive(Debug, Clone)]
pub struct Process {
    app: &'static AppDescriptor,
    state: ProcessState,
    launched_at: DateTime<Utc>,
}

impl Process {
    fn new(app: &'static AppDescriptor) -> Self {
        Self {
            app,
            state: ProcessState::Stopped,
            launched_at: Utc::now(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.app.name
    }

    pub fn app(&self) -> &'static AppDescriptor {
        self.app
    }

    pub fn state(&self) -> ProcessState {
        self.state
    }

    pub fn status(&self) -> StatusMask {
        self.state.status()
    }

    pub fn launched_at(&self) -> DateTime<Utc> {
        self.launched_at
    }

    /// Move to `next` if the state table allows it
    pub(crate) fn advance(&mut self, next: ProcessState) -> Result<()> {
        if !self.state.can_transition_to(next) {
            return Err(LifecycleError::InvalidTransition {
                name: self.name().to_string(),
                from: self.state,
                to: next,
            });
        }

        trace!(app = self.name(), from = %self.state, to = %next, "transition");
        self.state = next;
        Ok(())
    }

    /// Replace the state without consulting the state table
    pub(crate) fn overwrite(&mut self, next: ProcessState) {
        debug!(app = self.name(), from = %self.state, to = %next, "status override");
        self.state = next;
    }

    pub fn info(&self) -> ProcessInfo {
        let status = self.status();
        ProcessInfo {
            name: self.name(),
            state: self.state,
            started: status.contains(StatusMask::STARTED),
            resuming: status.contains(StatusMask::RESUMING),
            processing: status.contains(StatusMask::PROCESSING),
            auto_start: self.app.is_auto_start(),
            launched_at: self.launched_at,
        }
    }
}

/// Snapshot of a process, for listings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessInfo {
    pub name: &'static str,
    pub state: ProcessState,
    pub started: bool,
    pub resuming: bool,
    pub processing: bool,
    pub auto_start: bool,
    pub launched_at: DateTime<Utc>,
}

/// The set of live process records
#[derive(Debug, Default)]
pub struct ProcessTable {
    processes: VecDeque<Process>,
}

impl ProcessTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find(&self, name: &str) -> Option<&Process> {
        self.processes.iter().find(|p| p.name() == name)
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Process> {
        self.processes.iter_mut().find(|p| p.name() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// The existing record for `name`, or a fresh stopped record for the
    /// first matching descriptor. `None` when the registry has no such
    /// application.
    pub fn get_or_create(&mut self, registry: &AppRegistry, name: &str) -> Option<&mut Process> {
        if let Some(index) = self.processes.iter().position(|p| p.name() == name) {
            return self.processes.get_mut(index);
        }

        let app = registry.find(name)?;
        debug!(app = name, "creating process record");
        self.processes.push_front(Process::new(app));
        self.processes.front_mut()
    }

    /// Unlink the record for `name`, if any
    pub fn remove(&mut self, name: &str) -> Option<Process> {
        let index = self.processes.iter().position(|p| p.name() == name)?;
        self.processes.remove(index)
    }

    /// Names of every other process whose application requires `name`
    pub fn dependents_of(&self, name: &str) -> Vec<&'static str> {
        self.processes
            .iter()
            .filter(|p| p.name() != name && p.app().requires(name))
            .map(Process::name)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Process> {
        self.processes.iter()
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    pub fn clear(&mut self) {
        self.processes.clear();
    }
}
