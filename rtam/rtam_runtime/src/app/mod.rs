//! Application bookkeeping for the rtam runtime
//!
//! The registry is the platform's fixed application table; the process
//! table tracks the applications that are currently live.

pub mod registry;
pub mod table;

pub use registry::AppRegistry;
pub use table::{Process, ProcessInfo, ProcessTable};
