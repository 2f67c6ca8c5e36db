//! Utility types used across rtam.

pub mod logging;

pub use logging::LogLevel;
