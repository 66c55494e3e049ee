//! Repository layer for persisting the kanban hierarchy to SQLite

pub mod container;
pub mod hydration;
pub mod sqlite_repo;

pub use sqlite_repo::SqliteRepo;
