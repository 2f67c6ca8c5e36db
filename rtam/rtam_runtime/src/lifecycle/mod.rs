//! Lifecycle management for the rtam runtime

pub mod engine;

pub use engine::LifecycleEngine;
