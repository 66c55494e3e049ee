//! Column command handlers

#![allow(clippy::result_large_err)]

use super::container::reorder_in_tx;
use super::{begin_immediate, elapsed_ms, new_id, require_board, require_column};
use kanflow_core::model::Column;
use kanflow_core::ordering::{next_position, OrderedTable, ShiftRange};
use kanflow_core::rules::validation::{validate_color, validate_column_name, validate_task_limit};
use kanflow_core::{log_op_end, log_op_error, log_op_start};
use kanflow_store::errors::{from_rusqlite, Result};
use kanflow_store::repo::{container, SqliteRepo};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnCreate {
    pub board_id: String,
    pub name: String,
    pub color: Option<String>,
    pub task_limit: Option<u32>,
    /// Explicit slot; stored as given. Appended when absent.
    pub position: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnUpdate {
    pub name: Option<String>,
    pub color: Option<String>,
    /// `Some(None)` removes the WIP limit
    #[serde(default, deserialize_with = "super::nullable", skip_serializing_if = "Option::is_none")]
    pub task_limit: Option<Option<u32>>,
}

pub fn column_create(input: ColumnCreate, conn: &mut Connection) -> Result<Column> {
    log_op_start!("column_create", board_id = %input.board_id);
    let start = std::time::Instant::now();

    let result = column_create_impl(input, conn).map_err(|e| {
        log_op_error!("column_create", e.clone(), duration_ms = elapsed_ms(start));
        e
    })?;

    log_op_end!(
        "column_create",
        duration_ms = elapsed_ms(start),
        column_id = %result.id,
        position = result.position
    );
    Ok(result)
}

fn column_create_impl(input: ColumnCreate, conn: &mut Connection) -> Result<Column> {
    validate_column_name(&input.name)?;
    if let Some(color) = &input.color {
        validate_color(color)?;
    }
    if let Some(limit) = input.task_limit {
        validate_task_limit(limit)?;
    }

    let tx = begin_immediate(conn)?;
    require_board(&tx, &input.board_id)?;

    let position = match input.position {
        Some(position) => position,
        None => next_position(container::max_position(
            &tx,
            OrderedTable::Columns,
            &input.board_id,
        )?),
    };

    let mut column = Column::new(new_id(), input.board_id, input.name.trim().to_string(), position);
    column.task_limit = input.task_limit;
    if let Some(color) = input.color {
        column.color = color;
    }
    SqliteRepo::insert_column(&tx, &column)?;

    tx.commit().map_err(from_rusqlite)?;
    Ok(column)
}

/// # Errors
///
/// `NotFound` for an unknown column
pub fn column_get(column_id: &str, conn: &Connection) -> Result<Column> {
    require_column(conn, column_id)
}

/// Columns of a board in position order
pub fn column_list(board_id: &str, conn: &Connection) -> Result<Vec<Column>> {
    require_board(conn, board_id)?;
    SqliteRepo::list_columns(conn, board_id)
}

/// Update name, colour or WIP limit
///
/// Lowering the limit below the current task count is allowed; it only
/// affects later insertions.
pub fn column_update(column_id: &str, input: ColumnUpdate, conn: &Connection) -> Result<Column> {
    log_op_start!("column_update", column_id = column_id);
    let start = std::time::Instant::now();

    let result = column_update_impl(column_id, input, conn).map_err(|e| {
        log_op_error!(
            "column_update",
            e.clone(),
            duration_ms = elapsed_ms(start),
            column_id = column_id
        );
        e
    })?;

    log_op_end!("column_update", duration_ms = elapsed_ms(start));
    Ok(result)
}

fn column_update_impl(column_id: &str, input: ColumnUpdate, conn: &Connection) -> Result<Column> {
    let mut column = require_column(conn, column_id)?;

    if let Some(name) = input.name {
        validate_column_name(&name)?;
        column.name = name.trim().to_string();
    }
    if let Some(color) = input.color {
        validate_color(&color)?;
        column.color = color;
    }
    if let Some(limit) = input.task_limit {
        if let Some(value) = limit {
            validate_task_limit(value)?;
        }
        column.task_limit = limit;
    }
    column.updated_at = chrono::Utc::now();

    SqliteRepo::update_column(conn, &column)?;
    Ok(column)
}

/// Delete a column (and its tasks), closing the gap among its siblings
pub fn column_delete(column_id: &str, conn: &mut Connection) -> Result<()> {
    log_op_start!("column_delete", column_id = column_id);
    let start = std::time::Instant::now();

    let shifted = column_delete_impl(column_id, conn).map_err(|e| {
        log_op_error!(
            "column_delete",
            e.clone(),
            duration_ms = elapsed_ms(start),
            column_id = column_id
        );
        e
    })?;

    log_op_end!(
        "column_delete",
        duration_ms = elapsed_ms(start),
        shifted_rows = shifted
    );
    Ok(())
}

fn column_delete_impl(column_id: &str, conn: &mut Connection) -> Result<usize> {
    let tx = begin_immediate(conn)?;
    let column = require_column(&tx, column_id)?;

    SqliteRepo::delete_column(&tx, column_id)?;
    let shifted = container::shift_positions(
        &tx,
        OrderedTable::Columns,
        &ShiftRange::closing_gap_after(&column.board_id, column.position),
    )?;

    tx.commit().map_err(from_rusqlite)?;
    Ok(shifted)
}

/// Reorder all columns of a board
///
/// ## Errors
///
/// - `NotFound`: unknown board
/// - `InvalidArgument`: `ordered_ids` is not a permutation of the board's columns
pub fn column_reorder(board_id: &str, ordered_ids: &[String], conn: &mut Connection) -> Result<Vec<Column>> {
    log_op_start!(
        "column_reorder",
        board_id = board_id,
        child_count = ordered_ids.len()
    );
    let start = std::time::Instant::now();

    let result = column_reorder_impl(board_id, ordered_ids, conn).map_err(|e| {
        log_op_error!(
            "column_reorder",
            e.clone(),
            duration_ms = elapsed_ms(start),
            board_id = board_id
        );
        e
    })?;

    log_op_end!("column_reorder", duration_ms = elapsed_ms(start));
    Ok(result)
}

fn column_reorder_impl(board_id: &str, ordered_ids: &[String], conn: &mut Connection) -> Result<Vec<Column>> {
    let tx = begin_immediate(conn)?;
    reorder_in_tx(&tx, OrderedTable::Columns, board_id, ordered_ids)?;
    let columns = SqliteRepo::list_columns(&tx, board_id)?;
    tx.commit().map_err(from_rusqlite)?;
    Ok(columns)
}
