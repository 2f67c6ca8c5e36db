//! System management for the rtam runtime
//!
//! Configuration, the autostart sequence run at initialization, and
//! teardown.

pub mod bootstrap;
pub mod config;
pub mod shutdown;

pub use config::RuntimeConfig;
