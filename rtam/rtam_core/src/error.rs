//! Error types for the rtam lifecycle manager.
//!
//! Lifecycle operations report failures through [`LifecycleError`]. Every
//! variant collapses to one of the flat result codes in [`Outcome`], which
//! is what shell bindings and firmware callers usually care about.

use thiserror::Error;

use crate::types::{Outcome, ProcessState, Transition};

/// Result type for lifecycle operations.
pub type Result<T, E = LifecycleError> = std::result::Result<T, E>;

/// Errors reported by lifecycle operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    /// No descriptor in the registry carries this name
    #[error("application {0} not found")]
    NotFound(String),

    /// The descriptor exposes no lifecycle interface at all
    #[error("application {0} has no lifecycle interface")]
    NoInterface(String),

    /// No process record exists for this application
    #[error("application {0} is not running")]
    NotRunning(String),

    /// A start or stop was requested but the application does not implement it
    #[error("application {0} does not implement {1}")]
    Unimplemented(String, Transition),

    /// The application's hook reported a failure
    #[error("{1} hook of application {0} failed")]
    HookFailed(String, Transition),

    /// Another operation owns the process, or an asynchronous hook has not
    /// completed yet
    #[error("application {0} is processing another operation")]
    Processing(String),

    /// A suspend or resume was requested but the application has no hook for it
    #[error("application {0} does not support {1}")]
    NotSupported(String, Transition),

    /// The engine attempted a transition outside the state table
    #[error("application {name}: invalid transition {from} -> {to}")]
    InvalidTransition {
        name: String,
        from: ProcessState,
        to: ProcessState,
    },
}

impl LifecycleError {
    /// Collapse this error into its flat result code.
    pub fn outcome(&self) -> Outcome {
        match self {
            Self::Processing(_) => Outcome::Processing,
            Self::NotSupported(..) => Outcome::NotSupported,
            _ => Outcome::Fail,
        }
    }

    /// Whether this error only means "not yet"
    pub fn is_processing(&self) -> bool {
        matches!(self, Self::Processing(_))
    }
}

/// Errors that can occur while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
