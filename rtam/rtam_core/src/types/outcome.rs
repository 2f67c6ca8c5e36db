//! Flat result codes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{LifecycleError, Result};
use crate::types::Transition;

/// Result code shared by application hooks and public operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The operation completed.
    Ok,

    /// The operation failed.
    Fail,

    /// The operation is still in flight. A hook returning this must later
    /// report completion through the manager's `set_status`.
    Processing,

    /// The application has no hook for this transition.
    NotSupported,
}

impl Outcome {
    pub fn is_ok(self) -> bool {
        self == Self::Ok
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Fail => "fail",
            Self::Processing => "processing",
            Self::NotSupported => "not supported",
        }
    }

    /// Turn a hook's result code into a lifecycle result for `name`.
    pub fn into_result(self, name: &str, transition: Transition) -> Result<()> {
        match self {
            Self::Ok => Ok(()),
            Self::Fail => Err(LifecycleError::HookFailed(name.to_string(), transition)),
            Self::Processing => Err(LifecycleError::Processing(name.to_string())),
            Self::NotSupported => Err(LifecycleError::NotSupported(
                name.to_string(),
                transition,
            )),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<T> From<&Result<T>> for Outcome {
    fn from(result: &Result<T>) -> Self {
        match result {
            Ok(_) => Self::Ok,
            Err(err) => err.outcome(),
        }
    }
}
