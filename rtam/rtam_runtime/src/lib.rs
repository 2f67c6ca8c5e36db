//! rtam Runtime - application lifecycle manager
//!
//! This crate provides the runtime side of rtam: the registry of declared
//! applications, the table of live processes, the lifecycle engine that
//! resolves required and conflicting applications, configuration, and the
//! autostart and teardown sequences.

pub mod app;
pub mod lifecycle;
pub mod listing;
pub mod system;

use anyhow::Result;
use rtam_core::{AppDescriptor, AppLoader, StatusMask};
use tracing::info;

pub use app::{AppRegistry, ProcessInfo};
pub use lifecycle::LifecycleEngine;
pub use system::bootstrap::AutoStartReport;
pub use system::RuntimeConfig;

/// Manager facade that provides the command interface of the runtime.
pub struct Manager {
    /// Lifecycle engine owning the registry and the process table
    engine: LifecycleEngine,

    /// Configuration the manager was initialized with
    config: RuntimeConfig,

    /// Outcome of each autostart launch performed by `init`
    autostart: Vec<AutoStartReport>,
}

impl Manager {
    /// Initialize a manager over the applications the loader provides and
    /// run the autostart sequence when the configuration asks for it.
    pub fn init<L: AppLoader>(loader: L, config: RuntimeConfig) -> Result<Self> {
        info!("Initializing rtam manager");

        config.validate()?;

        let registry = AppRegistry::new(loader.load());
        let engine = LifecycleEngine::new(registry, config.dependency_timeout());

        let autostart = if config.autostart {
            system::bootstrap::launch_autostart(&engine)
        } else {
            info!("Autostart disabled by configuration");
            Vec::new()
        };

        info!(
            "rtam manager initialized with {} applications",
            registry.count()
        );

        Ok(Self {
            engine,
            config,
            autostart,
        })
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn engine(&self) -> &LifecycleEngine {
        &self.engine
    }

    pub fn registry(&self) -> &AppRegistry {
        self.engine.registry()
    }

    pub fn autostart_reports(&self) -> &[AutoStartReport] {
        &self.autostart
    }

    /// Launch an application, waiting on its dependencies for the
    /// configured timeout
    pub fn launch(&self, name: &str) -> rtam_core::Result<()> {
        self.engine.launch(name)
    }

    /// Launch an application with an explicit dependency wait bound
    pub fn launch_with_timeout(
        &self,
        name: &str,
        timeout: Option<std::time::Duration>,
    ) -> rtam_core::Result<()> {
        self.engine.launch_with_timeout(name, timeout)
    }

    /// Stop an application and drop its process record
    pub fn terminate(&self, name: &str) -> rtam_core::Result<()> {
        self.engine.terminate(name)
    }

    /// Move an application out of the foreground
    pub fn exit(&self, name: &str) -> rtam_core::Result<()> {
        self.engine.exit(name)
    }

    /// Report completion of an asynchronous hook
    pub fn set_status(&self, name: &str, bits: StatusMask, set: bool) -> rtam_core::Result<()> {
        self.engine.set_status(name, bits, set)
    }

    pub fn process_status(&self, name: &str) -> Option<ProcessInfo> {
        self.engine.process_info(name)
    }

    /// Snapshot of every process, newest first
    pub fn processes(&self) -> Vec<ProcessInfo> {
        self.engine.processes()
    }

    pub fn list_processes(&self) -> String {
        listing::render_processes(&self.engine.processes())
    }

    pub fn list_apps(&self) -> String {
        listing::render_apps(self.engine.registry(), &self.engine.processes())
    }

    /// The application table exactly as the loader provided it
    pub fn get_apps(&self) -> &'static [AppDescriptor] {
        self.engine.registry().as_slice()
    }

    /// Terminate every live process. Returns the names that could not be
    /// terminated.
    pub fn shutdown(&self) -> Vec<&'static str> {
        info!("Shutting down rtam manager");
        system::shutdown::terminate_all(&self.engine)
    }
}
