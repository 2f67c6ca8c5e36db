//! # rtam Core
//!
//! `rtam_core` holds the building blocks shared by the rtam lifecycle engine
//! and its front ends: application descriptors, the hook interface an
//! application implements, the per-process state machine, result codes and
//! error types.
//!
//! ## Model
//!
//! A firmware image declares a fixed set of applications up front. Each
//! [`AppDescriptor`] names an application, carries its flags, optionally
//! points at an [`AppHooks`] implementation and lists the applications it
//! requires or conflicts with. The runtime keeps one process record per
//! launched application and drives it through [`ProcessState`].
//!
//! ## Crate Structure
//!
//! - **error**: Error types for lifecycle operations and configuration
//! - **traits**: The application hook interface and the platform loader
//! - **types**: Descriptors, result codes, status bits and the state machine
//! - **utils**: Logging helpers

pub mod error;
pub mod traits;
pub mod types;
pub mod utils;

pub use error::{ConfigError, LifecycleError, Result};
pub use traits::{AppHooks, AppLoader, Capabilities, FnHooks};
pub use types::{
    AppDescriptor, AppFlags, Dependencies, Outcome, ProcessState, StatusMask, Transition,
};
pub use utils::LogLevel;
