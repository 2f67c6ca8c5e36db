//! Application Registry
//!
//! Read-only view over the application table handed over by the platform.

use std::collections::HashSet;

use rtam_core::AppDescriptor;
use tracing::{debug, warn};

/// The registry of every application the firmware image declares
#[derive(Debug, Clone, Copy)]
pub struct AppRegistry {
    apps: &'static [AppDescriptor],
}

impl AppRegistry {
    /// Wrap the platform's table. Duplicate names are reported but kept;
    /// lookups resolve to the first match.
    pub fn new(apps: &'static [AppDescriptor]) -> Self {
        let mut seen = HashSet::new();
        for app in apps {
            if !seen.insert(app.name) {
                warn!(app = app.name, "duplicate application name, first entry wins");
            }
        }

        debug!("Registry holds {} applications", apps.len());

        Self { apps }
    }

    pub fn count(&self) -> usize {
        self.apps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }

    pub fn at(&self, index: usize) -> Option<&'static AppDescriptor> {
        self.apps.get(index)
    }

    /// First descriptor named `name`
    pub fn find(&self, name: &str) -> Option<&'static AppDescriptor> {
        self.apps.iter().find(|app| app.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static AppDescriptor> {
        self.apps.iter()
    }

    /// The platform's table, unmodified
    pub fn as_slice(&self) -> &'static [AppDescriptor] {
        self.apps
    }
}
