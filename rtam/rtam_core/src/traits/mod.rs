//! Interfaces between the engine and the platform.
//!
//! - [`hooks`]: what an application implements
//! - [`loader`]: how the platform hands over its application table

pub mod hooks;
pub mod loader;

pub use hooks::{AppHooks, Capabilities, FnHooks};
pub use loader::AppLoader;
