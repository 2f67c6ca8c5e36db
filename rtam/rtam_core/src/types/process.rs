//! Process state.
//!
//! A process moves through the states below. Settled states are `Stopped`,
//! `Suspended` and `Running`; every other state means a hook is in flight
//! and the process is guarded against further lifecycle calls.
//!
//! ```text
//! Stopped    -> Starting -> Suspended | Stopped
//! Suspended  -> Resuming -> Running | Suspended
//! Running    -> Suspending -> Suspended | Running
//! Suspended | Running -> Stopping -> Stopped | back where it came from
//! ```
//!
//! The legacy three-bit view (`started`, `resuming`, `processing`) is kept
//! as [`StatusMask`] for listings and for asynchronous completion reports.

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// One of the four hookable transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    Start,
    Stop,
    Suspend,
    Resume,
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => write!(f, "start"),
            Self::Stop => write!(f, "stop"),
            Self::Suspend => write!(f, "suspend"),
            Self::Resume => write!(f, "resume"),
        }
    }
}

bitflags! {
    /// Status bits as reported to listings and accepted by `set_status`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StatusMask: u8 {
        /// Start completed and stop has not
        const STARTED = 1 << 0;
        /// Foreground, as opposed to suspended
        const RESUMING = 1 << 1;
        /// A lifecycle operation is in flight
        const PROCESSING = 1 << 2;
    }
}

impl FromStr for StatusMask {
    type Err = String;

    /// Parse names separated by `,` or `|`, e.g. `started,resuming`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut mask = StatusMask::empty();
        for part in s.split([',', '|']).map(str::trim).filter(|p| !p.is_empty()) {
            mask |= match part.to_lowercase().as_str() {
                "started" => StatusMask::STARTED,
                "resuming" => StatusMask::RESUMING,
                "processing" => StatusMask::PROCESSING,
                "none" => StatusMask::empty(),
                other => return Err(format!("unknown status bit: {}", other)),
            };
        }
        Ok(mask)
    }
}

/// Lifecycle state of one process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessState {
    /// Not started
    Stopped,

    /// Start hook in flight
    Starting,

    /// Started but not in the foreground, either freshly started or parked
    Suspended,

    /// Resume hook in flight
    Resuming,

    /// Started and in the foreground
    Running,

    /// Suspend hook in flight
    Suspending,

    /// Stop hook in flight; `foreground` is the sub-state to return to if
    /// the stop fails
    Stopping { foreground: bool },
}

impl ProcessState {
    pub fn is_started(self) -> bool {
        !matches!(self, Self::Stopped | Self::Starting)
    }

    pub fn is_foreground(self) -> bool {
        matches!(
            self,
            Self::Running | Self::Suspending | Self::Stopping { foreground: true }
        )
    }

    pub fn is_processing(self) -> bool {
        matches!(
            self,
            Self::Starting | Self::Resuming | Self::Suspending | Self::Stopping { .. }
        )
    }

    /// Derived status bits.
    pub fn status(self) -> StatusMask {
        let mut mask = StatusMask::empty();
        mask.set(StatusMask::STARTED, self.is_started());
        mask.set(StatusMask::RESUMING, self.is_foreground());
        mask.set(StatusMask::PROCESSING, self.is_processing());
        mask
    }

    /// Settled state for a set of status bits. `PROCESSING` is ignored, and
    /// `RESUMING` without `STARTED` has no meaning and yields `Stopped`.
    pub fn from_status(mask: StatusMask) -> Self {
        if !mask.contains(StatusMask::STARTED) {
            Self::Stopped
        } else if mask.contains(StatusMask::RESUMING) {
            Self::Running
        } else {
            Self::Suspended
        }
    }

    /// The same state with the foreground sub-state forced, where the state
    /// has one. Used when an application without a suspend or resume hook
    /// is parked or resumed directly.
    pub fn with_foreground(self, foreground: bool) -> Self {
        match self {
            Self::Suspended | Self::Running if foreground => Self::Running,
            Self::Suspended | Self::Running => Self::Suspended,
            Self::Stopping { .. } => Self::Stopping { foreground },
            other => other,
        }
    }

    /// Legal transitions driven by the engine.
    pub fn can_transition_to(self, next: ProcessState) -> bool {
        use ProcessState::*;

        matches!(
            (self, next),
            (Stopped, Starting)
                | (Starting, Suspended)
                | (Starting, Stopped)
                | (Suspended, Resuming)
                | (Suspended, Running)
                | (Suspended, Stopping { foreground: false })
                | (Resuming, Running)
                | (Resuming, Suspended)
                | (Running, Suspending)
                | (Running, Suspended)
                | (Running, Stopping { foreground: true })
                | (Suspending, Suspended)
                | (Suspending, Running)
                | (Stopping { .. }, Stopped)
                | (Stopping { .. }, Stopping { .. })
                | (Stopping { foreground: true }, Running)
                | (Stopping { foreground: false }, Suspended)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Stopped => "stopped",
            Self::Starting => "starting",
            Self::Suspended => "suspended",
            Self::Resuming => "resuming",
            Self::Running => "running",
            Self::Suspending => "suspending",
            Self::Stopping { .. } => "stopping",
        }
    }
}

impl fmt::Display for ProcessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
