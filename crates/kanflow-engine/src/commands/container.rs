//! Bulk reorder and compaction for any ordered container
//!
//! `task_reorder` and `column_reorder` are thin wrappers over
//! [`reorder_container`]; both validate the permutation before any write.

#![allow(clippy::result_large_err)]

use super::{begin_immediate, elapsed_ms, require_board, require_column};
use kanflow_core::ordering::{validate_permutation, OrderedTable};
use kanflow_core::{log_op_end, log_op_error, log_op_start};
use kanflow_store::errors::{from_rusqlite, Result};
use kanflow_store::repo::container;
use rusqlite::Connection;

/// Fail with `NotFound` unless the container's parent row exists
pub(crate) fn require_parent(conn: &Connection, table: OrderedTable, parent_id: &str) -> Result<()> {
    match table {
        OrderedTable::Columns => require_board(conn, parent_id).map(|_| ()),
        OrderedTable::Tasks => require_column(conn, parent_id).map(|_| ()),
    }
}

/// Validate and apply a full permutation on an open connection or transaction
///
/// Nothing is written unless `ordered_ids` is exactly the current child set.
pub(crate) fn reorder_in_tx(
    conn: &Connection,
    table: OrderedTable,
    parent_id: &str,
    ordered_ids: &[String],
) -> Result<usize> {
    require_parent(conn, table, parent_id)?;
    let existing = container::child_ids(conn, table, parent_id)?;
    validate_permutation(parent_id, &existing, ordered_ids)?;
    container::assign_positions(conn, table, ordered_ids)
}

/// Set `position = i` for the id at index `i`
///
/// ## Errors
///
/// - `NotFound`: the parent board/column does not exist
/// - `InvalidArgument`: wrong length, duplicate id, or an id that is not a
///   child of `parent_id` (checked in that order)
/// - `Persistence` / `Concurrency`: storage failure, nothing is applied
pub fn reorder_container(
    table: OrderedTable,
    parent_id: &str,
    ordered_ids: &[String],
    conn: &mut Connection,
) -> Result<Vec<String>> {
    log_op_start!(
        "container_reorder",
        table = table.as_str(),
        parent_id = parent_id,
        child_count = ordered_ids.len()
    );
    let start = std::time::Instant::now();

    let result = reorder_container_impl(table, parent_id, ordered_ids, conn).map_err(|e| {
        log_op_error!(
            "container_reorder",
            e.clone(),
            duration_ms = elapsed_ms(start),
            parent_id = parent_id
        );
        e
    })?;

    log_op_end!(
        "container_reorder",
        duration_ms = elapsed_ms(start),
        shifted_rows = result.1
    );
    Ok(result.0)
}

fn reorder_container_impl(
    table: OrderedTable,
    parent_id: &str,
    ordered_ids: &[String],
    conn: &mut Connection,
) -> Result<(Vec<String>, usize)> {
    let tx = begin_immediate(conn)?;
    let changed = reorder_in_tx(&tx, table, parent_id, ordered_ids)?;
    let ids = container::child_ids(&tx, table, parent_id)?;
    tx.commit().map_err(from_rusqlite)?;
    Ok((ids, changed))
}

/// Rewrite a container's positions to `0..n-1`, keeping the current order
///
/// Repairs gaps and ties left by older data. Returns the number of rows whose
/// position changed.
pub fn compact_container(table: OrderedTable, parent_id: &str, conn: &mut Connection) -> Result<usize> {
    log_op_start!(
        "container_compact",
        table = table.as_str(),
        parent_id = parent_id
    );
    let start = std::time::Instant::now();

    let result = compact_container_impl(table, parent_id, conn).map_err(|e| {
        log_op_error!(
            "container_compact",
            e.clone(),
            duration_ms = elapsed_ms(start),
            parent_id = parent_id
        );
        e
    })?;

    log_op_end!(
        "container_compact",
        duration_ms = elapsed_ms(start),
        shifted_rows = result
    );
    Ok(result)
}

fn compact_container_impl(table: OrderedTable, parent_id: &str, conn: &mut Connection) -> Result<usize> {
    let tx = begin_immediate(conn)?;
    require_parent(&tx, table, parent_id)?;
    let changed = container::compact_positions(&tx, table, parent_id)?;
    tx.commit().map_err(from_rusqlite)?;
    Ok(changed)
}
