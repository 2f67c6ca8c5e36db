//! Application hook interface.
//!
//! An application declares which transitions it implements through
//! [`AppHooks::capabilities`]. The engine only calls a hook whose capability
//! is declared; an undeclared start or stop is a failure, an undeclared
//! suspend or resume is reported as not supported.
//!
//! A hook that cannot finish synchronously returns [`Outcome::Processing`]
//! and later reports completion through the manager's `set_status`.

use bitflags::bitflags;

use crate::types::{Outcome, Transition};

bitflags! {
    /// Transitions an application implements.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Capabilities: u8 {
        const START = 1 << 0;
        const STOP = 1 << 1;
        const SUSPEND = 1 << 2;
        const RESUME = 1 << 3;
    }
}

impl Capabilities {
    pub fn supports(self, transition: Transition) -> bool {
        self.contains(Self::for_transition(transition))
    }

    pub fn for_transition(transition: Transition) -> Self {
        match transition {
            Transition::Start => Self::START,
            Transition::Stop => Self::STOP,
            Transition::Suspend => Self::SUSPEND,
            Transition::Resume => Self::RESUME,
        }
    }
}

/// Lifecycle hooks of one application.
pub trait AppHooks: Send + Sync {
    /// Transitions this application implements.
    fn capabilities(&self) -> Capabilities;

    fn start(&self) -> Outcome {
        Outcome::NotSupported
    }

    fn stop(&self) -> Outcome {
        Outcome::NotSupported
    }

    fn suspend(&self) -> Outcome {
        Outcome::NotSupported
    }

    fn resume(&self) -> Outcome {
        Outcome::NotSupported
    }

    /// Dispatch to the hook for `transition`.
    fn invoke(&self, transition: Transition) -> Outcome {
        match transition {
            Transition::Start => self.start(),
            Transition::Stop => self.stop(),
            Transition::Suspend => self.suspend(),
            Transition::Resume => self.resume(),
        }
    }
}

/// Hook table built from plain functions, for applications written in the
/// classic firmware style. Capabilities follow from which functions are set.
#[derive(Debug, Clone, Copy, Default)]
pub struct FnHooks {
    start: Option<fn() -> Outcome>,
    stop: Option<fn() -> Outcome>,
    suspend: Option<fn() -> Outcome>,
    resume: Option<fn() -> Outcome>,
}

impl FnHooks {
    pub const fn new() -> Self {
        Self {
            start: None,
            stop: None,
            suspend: None,
            resume: None,
        }
    }

    pub const fn with_start(self, start: fn() -> Outcome) -> Self {
        Self {
            start: Some(start),
            ..self
        }
    }

    pub const fn with_stop(self, stop: fn() -> Outcome) -> Self {
        Self {
            stop: Some(stop),
            ..self
        }
    }

    pub const fn with_suspend(self, suspend: fn() -> Outcome) -> Self {
        Self {
            suspend: Some(suspend),
            ..self
        }
    }

    pub const fn with_resume(self, resume: fn() -> Outcome) -> Self {
        Self {
            resume: Some(resume),
            ..self
        }
    }
}

impl AppHooks for FnHooks {
    fn capabilities(&self) -> Capabilities {
        let mut caps = Capabilities::empty();
        caps.set(Capabilities::START, self.start.is_some());
        caps.set(Capabilities::STOP, self.stop.is_some());
        caps.set(Capabilities::SUSPEND, self.suspend.is_some());
        caps.set(Capabilities::RESUME, self.resume.is_some());
        caps
    }

    fn start(&self) -> Outcome {
        self.start.map_or(Outcome::NotSupported, |f| f())
    }

    fn stop(&self) -> Outcome {
        self.stop.map_or(Outcome::NotSupported, |f| f())
    }

    fn suspend(&self) -> Outcome {
        self.suspend.map_or(Outcome::NotSupported, |f| f())
    }

    fn resume(&self) -> Outcome {
        self.resume.map_or(Outcome::NotSupported, |f| f())
    }
}
