//! Kanflow Engine - Orchestration layer
//!
//! Command handlers that coordinate the pure planning in kanflow-core with
//! persistence in kanflow-store. Each mutating handler owns exactly one
//! SQLite transaction and the lifecycle log events for its operation.

pub mod commands;

pub use commands::engine_command::{apply_engine_command, EngineCommand, EngineCommandResult};
