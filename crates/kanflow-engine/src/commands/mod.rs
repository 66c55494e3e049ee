//! Command orchestration layer.
//!
//! ## Logging Ownership
//!
//! Every public handler emits `log_op_start!` at entry and exactly one of
//! `log_op_end!` / `log_op_error!`. Lower layers only use `tracing::debug!`.
//!
//! ## Transactions
//!
//! Mutations that read positions before writing them run inside a SQLite
//! `IMMEDIATE` transaction, so the write lock is held from the first read.
//! Dropping the transaction on an error path rolls everything back.

#![allow(clippy::result_large_err)]

pub mod board;
pub mod column;
pub mod container;
pub mod engine_command;
pub mod project;
pub mod task;

use kanflow_core::errors::KanbanError;
use kanflow_store::errors::{from_rusqlite, Result};
use kanflow_store::repo::SqliteRepo;
use kanflow_core::model::{Board, Column, Project, Task};
use rusqlite::{Connection, Transaction, TransactionBehavior};

/// Start a transaction that takes the write lock immediately
pub(crate) fn begin_immediate(conn: &mut Connection) -> Result<Transaction<'_>> {
    conn.transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(from_rusqlite)
}

/// `deserialize_with` for clearable patch fields
///
/// Paired with `#[serde(default)]`: an absent key stays `None` (leave as is),
/// an explicit `null` becomes `Some(None)` (clear).
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::Deserialize<'de>,
{
    <Option<T> as serde::Deserialize>::deserialize(deserializer).map(Some)
}

pub(crate) fn new_id() -> String {
    uuid::Uuid::now_v7().to_string()
}

pub(crate) fn elapsed_ms(start: std::time::Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

pub(crate) fn require_project(conn: &Connection, project_id: &str) -> Result<Project> {
    SqliteRepo::get_project(conn, project_id)?.ok_or_else(|| {
        KanbanError::ProjectNotFound {
            project_id: project_id.to_string(),
        }
        .into()
    })
}

pub(crate) fn require_board(conn: &Connection, board_id: &str) -> Result<Board> {
    SqliteRepo::get_board(conn, board_id)?.ok_or_else(|| {
        KanbanError::BoardNotFound {
            board_id: board_id.to_string(),
        }
        .into()
    })
}

pub(crate) fn require_column(conn: &Connection, column_id: &str) -> Result<Column> {
    SqliteRepo::get_column(conn, column_id)?.ok_or_else(|| {
        KanbanError::ColumnNotFound {
            column_id: column_id.to_string(),
        }
        .into()
    })
}

pub(crate) fn require_task(conn: &Connection, task_id: &str) -> Result<Task> {
    SqliteRepo::get_task(conn, task_id)?.ok_or_else(|| {
        KanbanError::TaskNotFound {
            task_id: task_id.to_string(),
        }
        .into()
    })
}
