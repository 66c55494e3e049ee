//! Kanflow Store - SQLite persistence for ordered kanban containers
//!
//! Provides:
//! - Connection management (`db`) with WAL, foreign keys and busy timeout
//! - Embedded, checksummed migrations
//! - Row repository for projects, boards, columns and tasks
//! - The scoped shift-range primitive over positioned children (`repo::container`)
//! - Board and task hydration into read models
//!
//! Nothing here opens a transaction on its own except the migration runner;
//! callers pass either a `Connection` or a `Transaction` (which derefs to one).

pub mod db;
pub mod errors;
pub mod migrations;
pub mod repo;

// Re-export key types
pub use db::StoreOptions;
pub use errors::Result;
