//! Lifecycle Engine
//!
//! Drives processes through start, stop, suspend and resume while honoring
//! the `required` and `conflicted` declarations of their applications.
//!
//! Every primitive follows the same shape: check the precondition, take the
//! per-process guard by entering an in-flight state, run the side effects
//! with the table unlocked, then settle the state and wake any waiters.
//! Because the table lock is never held across a hook or a recursive call,
//! hooks are free to call back into the engine, and a completion reported
//! from another thread through [`LifecycleEngine::set_status`] wakes
//! dependency waits immediately.
//!
//! The dependency graph is not checked for cycles. A cycle resolves through
//! the guard (the inner call sees the outer process in flight and reports
//! `Processing`) followed by a wait bounded by the caller's timeout; with no
//! timeout such a wait never ends.

use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex, MutexGuard};
use rtam_core::{
    AppDescriptor, AppHooks, LifecycleError, Outcome, ProcessState, Result, StatusMask,
    Transition,
};
use tracing::{debug, info, warn};

use crate::app::registry::AppRegistry;
use crate::app::table::{ProcessInfo, ProcessTable};

/// The lifecycle state machine over one registry and its process table
pub struct LifecycleEngine {
    /// Applications declared by the platform
    registry: AppRegistry,

    /// Live process records
    table: Mutex<ProcessTable>,

    /// Signalled on every process state change
    changed: Condvar,

    /// Dependency wait bound used by `launch`; `None` waits forever
    default_timeout: Option<Duration>,
}

impl LifecycleEngine {
    pub fn new(registry: AppRegistry, default_timeout: Option<Duration>) -> Self {
        Self {
            registry,
            table: Mutex::new(ProcessTable::new()),
            changed: Condvar::new(),
            default_timeout,
        }
    }

    pub fn registry(&self) -> &AppRegistry {
        &self.registry
    }

    pub fn default_timeout(&self) -> Option<Duration> {
        self.default_timeout
    }

    /// Launch `name`, waiting on dependencies for the default timeout
    pub fn launch(&self, name: &str) -> Result<()> {
        self.launch_with_timeout(name, self.default_timeout)
    }

    /// Launch `name`: start it (resolving dependencies and conflicts, with
    /// dependency waits bounded by `timeout`) and, once started, resume it.
    pub fn launch_with_timeout(&self, name: &str, timeout: Option<Duration>) -> Result<()> {
        let app = {
            let mut table = self.table.lock();
            match table.get_or_create(&self.registry, name) {
                Some(process) => process.app(),
                None => {
                    warn!(app = name, "application not found");
                    return Err(LifecycleError::NotFound(name.to_string()));
                }
            }
        };

        if app.interface.is_none() {
            warn!(app = name, "application has no lifecycle interface");
            return Err(LifecycleError::NoInterface(name.to_string()));
        }

        self.start(app, timeout)?;
        self.resume(name)
    }

    /// Terminate `name`: park it, stop it, and drop its record once the stop
    /// has completed. While any lifecycle hook is in flight, including a
    /// pending start, the record is kept and `Processing` is reported; any
    /// other failure keeps the record for a retry.
    pub fn terminate(&self, name: &str) -> Result<()> {
        if !self.table.lock().contains(name) {
            return Err(LifecycleError::NotRunning(name.to_string()));
        }

        if let Err(err) = self.suspend(name) {
            debug!(app = name, "suspend before terminate: {}", err);
        }

        match self.stop(name) {
            Ok(()) => {
                if !self.remove_stopped(name) {
                    return Err(LifecycleError::Processing(name.to_string()));
                }
                info!(app = name, "terminated");
                Ok(())
            }
            Err(err) if err.is_processing() => Err(err),
            Err(LifecycleError::NotSupported(..)) => {
                warn!(app = name, "stop hook reported not supported");
                Err(LifecycleError::HookFailed(name.to_string(), Transition::Stop))
            }
            Err(err) => {
                warn!(app = name, "terminate failed: {}", err);
                Err(err)
            }
        }
    }

    /// Leave the foreground: background-capable applications are suspended,
    /// everything else is stopped.
    pub fn exit(&self, name: &str) -> Result<()> {
        let app = self.app_of(name)?;

        if app.is_background() {
            self.suspend(name)
        } else {
            info!(app = name, "suspend not supported, stopping instead");
            self.stop(name)
        }
    }

    /// Completion report for an asynchronous hook: set or clear `bits` and
    /// release the process guard.
    pub fn set_status(&self, name: &str, bits: StatusMask, set: bool) -> Result<()> {
        {
            let mut table = self.table.lock();
            let process = table
                .find_mut(name)
                .ok_or_else(|| LifecycleError::NotRunning(name.to_string()))?;

            let mut status = process.status();
            status.set(bits, set);
            status.remove(StatusMask::PROCESSING);
            process.overwrite(ProcessState::from_status(status));
        }

        self.changed.notify_all();
        Ok(())
    }

    /// Snapshot of one process
    pub fn process_info(&self, name: &str) -> Option<ProcessInfo> {
        self.table.lock().find(name).map(|p| p.info())
    }

    /// Snapshot of every process, newest first
    pub fn processes(&self) -> Vec<ProcessInfo> {
        self.table.lock().iter().map(|p| p.info()).collect()
    }

    fn app_of(&self, name: &str) -> Result<&'static AppDescriptor> {
        self.table
            .lock()
            .find(name)
            .map(|p| p.app())
            .ok_or_else(|| LifecycleError::NotRunning(name.to_string()))
    }

    fn start(&self, app: &'static AppDescriptor, timeout: Option<Duration>) -> Result<()> {
        let name = app.name;
        let hooks = {
            let mut table = self.table.lock();
            let process = table
                .find_mut(name)
                .ok_or_else(|| LifecycleError::NotRunning(name.to_string()))?;

            if process.state().is_started() {
                return Ok(());
            }
            let hooks = hook_for(app, Transition::Start)
                .ok_or_else(|| LifecycleError::Unimplemented(name.to_string(), Transition::Start))?;
            if process.state().is_processing() {
                return Err(LifecycleError::Processing(name.to_string()));
            }
            process.advance(ProcessState::Starting)?;
            hooks
        };
        self.changed.notify_all();

        for required in app.dependencies.required {
            match self.launch_with_timeout(required, timeout) {
                Ok(()) => {}
                Err(err) if err.is_processing() => {
                    if !self.wait_for(required, timeout, |state| {
                        state.is_some_and(ProcessState::is_started)
                    }) {
                        warn!(app = name, dependency = *required, "required application not started in time");
                    }
                }
                Err(LifecycleError::NotSupported(..)) => {}
                Err(err) => warn!(app = name, dependency = *required, "required application: {}", err),
            }
        }

        for conflicted in app.dependencies.conflicted {
            match self.terminate(conflicted) {
                Ok(()) | Err(LifecycleError::NotRunning(_)) => {}
                Err(err) if err.is_processing() => {
                    if !self.wait_for(conflicted, timeout, |state| {
                        !state.is_some_and(ProcessState::is_started)
                    }) {
                        warn!(app = name, conflict = *conflicted, "conflicting application still running, starting anyway");
                    }
                }
                Err(err) => warn!(app = name, conflict = *conflicted, "conflicting application: {}", err),
            }
        }

        info!(app = name, "starting");
        let outcome = hooks.invoke(Transition::Start);
        self.settle(name, outcome, |state| {
            (state == ProcessState::Starting).then_some(if outcome.is_ok() {
                ProcessState::Suspended
            } else {
                ProcessState::Stopped
            })
        });

        outcome.into_result(name, Transition::Start)
    }

    fn stop(&self, name: &str) -> Result<()> {
        let (hooks, dependents) = {
            let mut table = self.table.lock();
            let process = table
                .find_mut(name)
                .ok_or_else(|| LifecycleError::NotRunning(name.to_string()))?;
            let state = process.state();

            // A pending start counts as in flight, not as stopped
            if state.is_processing() {
                return Err(LifecycleError::Processing(name.to_string()));
            }
            if !state.is_started() {
                return Ok(());
            }
            let hooks = hook_for(process.app(), Transition::Stop)
                .ok_or_else(|| LifecycleError::Unimplemented(name.to_string(), Transition::Stop))?;
            process.advance(ProcessState::Stopping {
                foreground: state.is_foreground(),
            })?;
            (hooks, table.dependents_of(name))
        };
        self.changed.notify_all();

        for dependent in dependents {
            debug!(app = name, dependent, "stopping dependent first");
            if let Err(err) = self.stop(dependent) {
                warn!(app = name, dependent, "dependent did not stop: {}", err);
            }
        }

        info!(app = name, "stopping");
        let outcome = hooks.invoke(Transition::Stop);
        self.settle(name, outcome, |state| match state {
            ProcessState::Stopping { .. } if outcome.is_ok() => Some(ProcessState::Stopped),
            ProcessState::Stopping { foreground: true } => Some(ProcessState::Running),
            ProcessState::Stopping { foreground: false } => Some(ProcessState::Suspended),
            _ => None,
        });

        outcome.into_result(name, Transition::Stop)
    }

    fn suspend(&self, name: &str) -> Result<()> {
        let hooks = {
            let mut table = self.table.lock();
            let process = table
                .find_mut(name)
                .ok_or_else(|| LifecycleError::NotRunning(name.to_string()))?;
            let state = process.state();

            if !state.is_foreground() {
                return Ok(());
            }
            let Some(hooks) = hook_for(process.app(), Transition::Suspend) else {
                let parked = state.with_foreground(false);
                if parked != state {
                    process.advance(parked)?;
                }
                drop(table);
                self.changed.notify_all();
                return Err(LifecycleError::NotSupported(name.to_string(), Transition::Suspend));
            };
            if state.is_processing() {
                return Err(LifecycleError::Processing(name.to_string()));
            }
            process.advance(ProcessState::Suspending)?;
            hooks
        };
        self.changed.notify_all();

        debug!(app = name, "suspending");
        let outcome = hooks.invoke(Transition::Suspend);
        self.settle(name, outcome, |state| {
            (state == ProcessState::Suspending).then_some(if outcome.is_ok() {
                ProcessState::Suspended
            } else {
                ProcessState::Running
            })
        });

        outcome.into_result(name, Transition::Suspend)
    }

    fn resume(&self, name: &str) -> Result<()> {
        let hooks = {
            let mut table = self.table.lock();
            let process = table
                .find_mut(name)
                .ok_or_else(|| LifecycleError::NotRunning(name.to_string()))?;
            let state = process.state();

            if state.is_foreground() {
                return Ok(());
            }
            let Some(hooks) = hook_for(process.app(), Transition::Resume) else {
                let resumed = state.with_foreground(true);
                if resumed != state {
                    process.advance(resumed)?;
                }
                drop(table);
                self.changed.notify_all();
                return Err(LifecycleError::NotSupported(name.to_string(), Transition::Resume));
            };
            if state.is_processing() {
                return Err(LifecycleError::Processing(name.to_string()));
            }
            if !state.is_started() {
                return Err(LifecycleError::NotRunning(name.to_string()));
            }
            process.advance(ProcessState::Resuming)?;
            hooks
        };
        self.changed.notify_all();

        debug!(app = name, "resuming");
        let outcome = hooks.invoke(Transition::Resume);
        self.settle(name, outcome, |state| {
            (state == ProcessState::Resuming).then_some(if outcome.is_ok() {
                ProcessState::Running
            } else {
                ProcessState::Suspended
            })
        });

        outcome.into_result(name, Transition::Resume)
    }

    /// Apply the result of a hook. `next` maps the current in-flight state
    /// to its successor and returns `None` when the state is no longer the
    /// one this call entered, which happens when `set_status` already
    /// settled it. A `Processing` result leaves the guard in place.
    fn settle<F>(&self, name: &str, outcome: Outcome, next: F)
    where
        F: FnOnce(ProcessState) -> Option<ProcessState>,
    {
        if outcome == Outcome::Processing {
            debug!(app = name, "completion pending");
            return;
        }

        {
            let mut table = self.table.lock();
            match table.find_mut(name) {
                Some(process) => match next(process.state()) {
                    Some(state) => {
                        if let Err(err) = process.advance(state) {
                            warn!("{}", err);
                        }
                    }
                    None => debug!(app = name, state = %process.state(), "state settled while hook ran"),
                },
                None => debug!(app = name, "process removed while hook ran"),
            }
        }

        self.changed.notify_all();
    }

    /// Drop the record of a process that has come to rest in `Stopped`.
    /// Returns false when the record is kept because the process left
    /// `Stopped` in the meantime.
    fn remove_stopped(&self, name: &str) -> bool {
        let mut table = self.table.lock();
        let removed = match table.find(name).map(|p| p.state()) {
            Some(ProcessState::Stopped) => {
                table.remove(name);
                true
            }
            Some(state) => {
                debug!(app = name, %state, "left stopped before removal, keeping record");
                false
            }
            None => true,
        };
        drop(table);
        self.changed.notify_all();
        removed
    }

    /// Block until `settled` holds for the state of `name` (`None` when it
    /// has no record) or `timeout` elapses. Returns the final verdict.
    fn wait_for<F>(&self, name: &str, timeout: Option<Duration>, settled: F) -> bool
    where
        F: Fn(Option<ProcessState>) -> bool,
    {
        let deadline = timeout.map(|t| Instant::now() + t);
        let mut table = self.table.lock();

        debug!(app = name, ?timeout, "waiting for application");
        loop {
            if settled(current_state(&table, name)) {
                return true;
            }
            match deadline {
                Some(deadline) => {
                    if self.changed.wait_until(&mut table, deadline).timed_out() {
                        return settled(current_state(&table, name));
                    }
                }
                None => self.changed.wait(&mut table),
            }
        }
    }
}

fn current_state(table: &MutexGuard<'_, ProcessTable>, name: &str) -> Option<ProcessState> {
    table.find(name).map(|p| p.state())
}

/// The application's hooks, if it declares `transition`
fn hook_for(app: &'static AppDescriptor, transition: Transition) -> Option<&'static dyn AppHooks> {
    app.interface
        .filter(|hooks| hooks.capabilities().supports(transition))
}
