//! Data structures used throughout rtam.

pub mod app;
pub mod outcome;
pub mod process;

pub use app::{AppDescriptor, AppFlags, Dependencies};
pub use outcome::Outcome;
pub use process::{ProcessState, StatusMask, Transition};
