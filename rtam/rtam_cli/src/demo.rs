//! Bundled demo firmware image
//!
//! A small set of applications wired together with required and
//! conflicting declarations, used by every CLI invocation.

use std::sync::{Arc, OnceLock, Weak};
use std::thread;
use std::time::Duration;

use rtam_core::{AppDescriptor, AppFlags, AppHooks, Capabilities, FnHooks, Outcome, StatusMask};
use rtam_runtime::Manager;
use tracing::{info, warn};

/// Hooks that log each call and succeed
struct DemoApp {
    name: &'static str,
    capabilities: Capabilities,
}

impl DemoApp {
    const fn new(name: &'static str, capabilities: Capabilities) -> Self {
        Self { name, capabilities }
    }
}

impl AppHooks for DemoApp {
    fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    fn start(&self) -> Outcome {
        info!(app = self.name, "start hook");
        Outcome::Ok
    }

    fn stop(&self) -> Outcome {
        info!(app = self.name, "stop hook");
        Outcome::Ok
    }

    fn suspend(&self) -> Outcome {
        info!(app = self.name, "suspend hook");
        Outcome::Ok
    }

    fn resume(&self) -> Outcome {
        info!(app = self.name, "resume hook");
        Outcome::Ok
    }
}

const START_STOP: Capabilities = Capabilities::START.union(Capabilities::STOP);

static LOGGER: DemoApp = DemoApp::new("logger", Capabilities::all());
static STORAGE: DemoApp = DemoApp::new("storage", Capabilities::all());
static NETWORK: DemoApp = DemoApp::new("network", START_STOP);
static WIFI: DemoApp = DemoApp::new("wifi", Capabilities::all());
static BLUETOOTH: DemoApp = DemoApp::new("bluetooth", Capabilities::all());
static UI: DemoApp = DemoApp::new("ui", Capabilities::all());

static OTA: FnHooks = FnHooks::new()
    .with_start(ota_start)
    .with_stop(ota_stop)
    .with_resume(ota_resume);

/// Delay before the update service reports that it has started
const OTA_START_DELAY: Duration = Duration::from_millis(200);

static MANAGER: OnceLock<Weak<Manager>> = OnceLock::new();

/// The demo image
pub static IMAGE: [AppDescriptor; 8] = [
    AppDescriptor::new("logger")
        .with_flags(AppFlags::AUTO_START.union(AppFlags::SERVICE))
        .with_interface(&LOGGER),
    AppDescriptor::new("storage")
        .with_flags(AppFlags::AUTO_START.union(AppFlags::SERVICE))
        .with_interface(&STORAGE),
    AppDescriptor::new("network")
        .with_flags(AppFlags::SERVICE)
        .with_interface(&NETWORK)
        .with_required(&["logger"]),
    AppDescriptor::new("wifi")
        .with_flags(AppFlags::BACKGROUND)
        .with_interface(&WIFI)
        .with_required(&["network"])
        .with_conflicted(&["bluetooth"]),
    AppDescriptor::new("bluetooth")
        .with_flags(AppFlags::BACKGROUND)
        .with_interface(&BLUETOOTH)
        .with_conflicted(&["wifi"]),
    AppDescriptor::new("ui")
        .with_flags(AppFlags::AUTO_START)
        .with_interface(&UI)
        .with_required(&["storage", "logger"]),
    AppDescriptor::new("ota")
        .with_flags(AppFlags::SERVICE)
        .with_interface(&OTA)
        .with_required(&["network"]),
    AppDescriptor::new("console"),
];

/// Hand the manager to hooks that complete asynchronously
pub fn attach(manager: &Arc<Manager>) {
    if MANAGER.set(Arc::downgrade(manager)).is_err() {
        warn!("demo image already attached to a manager");
    }
}

fn ota_start() -> Outcome {
    info!(app = "ota", "start hook, completing in background");

    thread::spawn(|| {
        thread::sleep(OTA_START_DELAY);
        match MANAGER.get().and_then(Weak::upgrade) {
            Some(manager) => {
                if let Err(err) = manager.set_status("ota", StatusMask::STARTED, true) {
                    warn!(app = "ota", "completion report failed: {}", err);
                }
            }
            None => warn!(app = "ota", "manager gone before start completed"),
        }
    });

    Outcome::Processing
}

fn ota_stop() -> Outcome {
    info!(app = "ota", "stop hook");
    Outcome::Ok
}

fn ota_resume() -> Outcome {
    info!(app = "ota", "resume hook");
    Outcome::Ok
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_image_is_consistent() {
        let names: HashSet<_> = IMAGE.iter().map(|app| app.name).collect();
        assert_eq!(names.len(), IMAGE.len());

        for app in IMAGE.iter() {
            for dep in app
                .dependencies
                .required
                .iter()
                .chain(app.dependencies.conflicted)
            {
                assert!(names.contains(dep), "{} names unknown {}", app.name, dep);
            }
        }
    }

    #[test]
    fn test_autostart_set() {
        let autostart: Vec<_> = IMAGE
            .iter()
            .filter(|app| app.is_auto_start())
            .map(|app| app.name)
            .collect();
        assert_eq!(autostart, vec!["logger", "storage", "ui"]);
    }
}
