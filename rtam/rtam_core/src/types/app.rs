//! Application descriptors.
//!
//! Descriptors are declared once by the firmware image and live for the
//! whole program. The builder methods are `const fn`, so a registry can be a
//! plain `static` array:
//!
//! ```
//! use rtam_core::{AppDescriptor, AppFlags, FnHooks, Outcome};
//!
//! fn start() -> Outcome { Outcome::Ok }
//! fn stop() -> Outcome { Outcome::Ok }
//!
//! static NET_HOOKS: FnHooks = FnHooks::new().with_start(start).with_stop(stop);
//!
//! static APPS: [AppDescriptor; 2] = [
//!     AppDescriptor::new("logger").with_flags(AppFlags::AUTO_START),
//!     AppDescriptor::new("network")
//!         .with_flags(AppFlags::SERVICE)
//!         .with_interface(&NET_HOOKS)
//!         .with_required(&["logger"]),
//! ];
//!
//! assert_eq!(APPS[1].dependencies.required, &["logger"]);
//! assert!(APPS[1].interface.is_some());
//! ```

use std::any::Any;
use std::fmt;

use bitflags::bitflags;

use crate::traits::AppHooks;

bitflags! {
    /// Static application flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct AppFlags: u32 {
        /// Launched automatically when the manager initializes
        const AUTO_START = 1 << 0;
        /// Long-running service
        const SERVICE = 1 << 1;
        /// Can be parked with suspend instead of being stopped
        const BACKGROUND = 1 << 2;
    }
}

/// Declared relationships to other applications, by name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dependencies {
    /// Applications that must be running before this one starts, in order
    pub required: &'static [&'static str],

    /// Applications that must be stopped before this one starts, in order
    pub conflicted: &'static [&'static str],
}

impl Dependencies {
    /// No relationships.
    pub const NONE: Self = Self {
        required: &[],
        conflicted: &[],
    };
}

/// Immutable definition of one controllable application.
#[derive(Clone, Copy)]
pub struct AppDescriptor {
    /// Unique identifier
    pub name: &'static str,

    /// Static flags
    pub flags: AppFlags,

    /// Lifecycle hooks, absent when the application cannot be driven at all
    pub interface: Option<&'static dyn AppHooks>,

    /// Required and conflicted applications
    pub dependencies: Dependencies,

    /// Caller-defined payload, never interpreted by the engine
    pub info: Option<&'static (dyn Any + Send + Sync)>,
}

impl AppDescriptor {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            flags: AppFlags::empty(),
            interface: None,
            dependencies: Dependencies::NONE,
            info: None,
        }
    }

    pub const fn with_flags(self, flags: AppFlags) -> Self {
        Self { flags, ..self }
    }

    pub const fn with_interface(self, hooks: &'static dyn AppHooks) -> Self {
        Self {
            interface: Some(hooks),
            ..self
        }
    }

    pub const fn with_required(self, required: &'static [&'static str]) -> Self {
        Self {
            dependencies: Dependencies {
                required,
                conflicted: self.dependencies.conflicted,
            },
            ..self
        }
    }

    pub const fn with_conflicted(self, conflicted: &'static [&'static str]) -> Self {
        Self {
            dependencies: Dependencies {
                required: self.dependencies.required,
                conflicted,
            },
            ..self
        }
    }

    pub const fn with_info(self, info: &'static (dyn Any + Send + Sync)) -> Self {
        Self {
            info: Some(info),
            ..self
        }
    }

    pub fn is_auto_start(&self) -> bool {
        self.flags.contains(AppFlags::AUTO_START)
    }

    pub fn is_background(&self) -> bool {
        self.flags.contains(AppFlags::BACKGROUND)
    }

    /// Whether this application lists `name` among its required applications.
    pub fn requires(&self, name: &str) -> bool {
        self.dependencies.required.iter().any(|r| *r == name)
    }
}

impl fmt::Debug for AppDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppDescriptor")
            .field("name", &self.name)
            .field("flags", &self.flags)
            .field(
                "capabilities",
                &self.interface.map(|hooks| hooks.capabilities()),
            )
            .field("dependencies", &self.dependencies)
            .field("info", &self.info.is_some())
            .finish()
    }
}
