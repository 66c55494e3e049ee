//! Ordered container primitives over SQLite
//!
//! Every function is scoped to one `(table, parent_id)` container and runs on
//! whatever connection or transaction the caller passes in.

#![allow(clippy::result_large_err)]

use crate::errors::{from_rusqlite, Result};
use kanflow_core::ordering::{OrderedTable, ShiftRange};
use rusqlite::Connection;

/// SQL table name and parent key column for a container kind
fn table_sql(table: OrderedTable) -> (&'static str, &'static str) {
    match table {
        OrderedTable::Columns => ("board_columns", "board_id"),
        OrderedTable::Tasks => ("tasks", "column_id"),
    }
}

/// Apply one shift range as a single `UPDATE`
///
/// Returns the number of rows moved.
pub fn shift_positions(conn: &Connection, table: OrderedTable, range: &ShiftRange) -> Result<usize> {
    let (name, parent) = table_sql(table);
    let delta = range.delta.as_i64();

    let shifted = match range.upper {
        Some(upper) => conn.execute(
            &format!(
                "UPDATE {name} SET position = position + ?1
                 WHERE {parent} = ?2 AND position >= ?3 AND position <= ?4"
            ),
            rusqlite::params![delta, range.parent_id, range.lower, upper],
        ),
        None => conn.execute(
            &format!(
                "UPDATE {name} SET position = position + ?1
                 WHERE {parent} = ?2 AND position >= ?3"
            ),
            rusqlite::params![delta, range.parent_id, range.lower],
        ),
    }
    .map_err(from_rusqlite)?;

    tracing::debug!(
        table = table.as_str(),
        parent_id = %range.parent_id,
        lower = range.lower,
        upper = ?range.upper,
        delta,
        shifted,
        "Shifted positions"
    );

    Ok(shifted)
}

/// Number of children in a container
pub fn child_count(conn: &Connection, table: OrderedTable, parent_id: &str) -> Result<u32> {
    let (name, parent) = table_sql(table);
    conn.query_row(
        &format!("SELECT COUNT(*) FROM {name} WHERE {parent} = ?1"),
        [parent_id],
        |row| row.get(0),
    )
    .map_err(from_rusqlite)
}

/// Child ids in display order
///
/// Ties on `position` (only possible in legacy data) fall back to creation
/// time, then id.
pub fn child_ids(conn: &Connection, table: OrderedTable, parent_id: &str) -> Result<Vec<String>> {
    let (name, parent) = table_sql(table);
    let mut stmt = conn
        .prepare(&format!(
            "SELECT id FROM {name} WHERE {parent} = ?1 ORDER BY position, created_at, id"
        ))
        .map_err(from_rusqlite)?;
    let ids = stmt
        .query_map([parent_id], |row| row.get(0))
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<String>, _>>()
        .map_err(from_rusqlite)?;
    Ok(ids)
}

/// All persisted positions of a container, ascending
pub fn positions(conn: &Connection, table: OrderedTable, parent_id: &str) -> Result<Vec<u32>> {
    let (name, parent) = table_sql(table);
    let mut stmt = conn
        .prepare(&format!(
            "SELECT position FROM {name} WHERE {parent} = ?1 ORDER BY position"
        ))
        .map_err(from_rusqlite)?;
    let positions = stmt
        .query_map([parent_id], |row| row.get(0))
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<u32>, _>>()
        .map_err(from_rusqlite)?;
    Ok(positions)
}

/// Highest position in a container, `None` when empty
pub fn max_position(conn: &Connection, table: OrderedTable, parent_id: &str) -> Result<Option<u32>> {
    let (name, parent) = table_sql(table);
    conn.query_row(
        &format!("SELECT MAX(position) FROM {name} WHERE {parent} = ?1"),
        [parent_id],
        |row| row.get(0),
    )
    .map_err(from_rusqlite)
}

/// Write one child's position, returning the number of rows touched (0 or 1)
pub fn set_position(conn: &Connection, table: OrderedTable, id: &str, position: u32) -> Result<usize> {
    let (name, _) = table_sql(table);
    conn.execute(
        &format!("UPDATE {name} SET position = ?1 WHERE id = ?2"),
        rusqlite::params![position, id],
    )
    .map_err(from_rusqlite)
}

/// Write `0..n-1` onto `ordered_ids`, skipping rows already in place
///
/// Returns the number of rows whose position changed.
pub fn assign_positions(conn: &Connection, table: OrderedTable, ordered_ids: &[String]) -> Result<usize> {
    let (name, _) = table_sql(table);
    let mut stmt = conn
        .prepare(&format!(
            "UPDATE {name} SET position = ?1 WHERE id = ?2 AND position != ?1"
        ))
        .map_err(from_rusqlite)?;

    let mut changed = 0;
    for (index, id) in ordered_ids.iter().enumerate() {
        changed += stmt
            .execute(rusqlite::params![index as u32, id])
            .map_err(from_rusqlite)?;
    }
    Ok(changed)
}

/// Rewrite a container's positions to `0..n-1`, keeping the current order
pub fn compact_positions(conn: &Connection, table: OrderedTable, parent_id: &str) -> Result<usize> {
    let ids = child_ids(conn, table, parent_id)?;
    assign_positions(conn, table, &ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migrations::apply_migrations;
    use kanflow_core::ordering::ShiftDelta;

    fn setup() -> Connection {
        let mut conn = crate::db::open_in_memory().unwrap();
        apply_migrations(&mut conn).unwrap();
        conn.execute_batch(
            "INSERT INTO projects (id, name, created_at, updated_at) VALUES ('p', 'P', 0, 0);
             INSERT INTO boards (id, project_id, name, created_at, updated_at) VALUES ('b', 'p', 'B', 0, 0);
             INSERT INTO board_columns (id, board_id, name, position, created_at, updated_at)
                VALUES ('c', 'b', 'C', 0, 0, 0);",
        )
        .unwrap();
        for (i, id) in ["t0", "t1", "t2", "t3"].iter().enumerate() {
            conn.execute(
                "INSERT INTO tasks (id, column_id, title, position, created_at, updated_at)
                 VALUES (?1, 'c', ?1, ?2, ?3, ?3)",
                rusqlite::params![id, i as u32, i as i64],
            )
            .unwrap();
        }
        conn
    }

    #[test]
    fn test_shift_bounded_range() {
        let conn = setup();
        let range = ShiftRange::between("c", 1, 2, ShiftDelta::Increment);

        let shifted = shift_positions(&conn, OrderedTable::Tasks, &range).unwrap();

        assert_eq!(shifted, 2);
        assert_eq!(positions(&conn, OrderedTable::Tasks, "c").unwrap(), vec![0, 2, 3, 3]);
    }

    #[test]
    fn test_shift_unbounded_range_is_scoped_to_parent() {
        let conn = setup();
        let range = ShiftRange::opening_gap_at("other", 0);

        assert_eq!(shift_positions(&conn, OrderedTable::Tasks, &range).unwrap(), 0);
        assert_eq!(max_position(&conn, OrderedTable::Tasks, "c").unwrap(), Some(3));
    }

    #[test]
    fn test_counts_and_ids() {
        let conn = setup();
        assert_eq!(child_count(&conn, OrderedTable::Tasks, "c").unwrap(), 4);
        assert_eq!(child_count(&conn, OrderedTable::Columns, "b").unwrap(), 1);
        assert_eq!(max_position(&conn, OrderedTable::Tasks, "empty").unwrap(), None);
        assert_eq!(
            child_ids(&conn, OrderedTable::Tasks, "c").unwrap(),
            vec!["t0", "t1", "t2", "t3"]
        );
    }

    #[test]
    fn test_compact_repairs_gaps_and_ties() {
        let conn = setup();
        set_position(&conn, OrderedTable::Tasks, "t0", 5).unwrap();
        set_position(&conn, OrderedTable::Tasks, "t2", 1).unwrap();

        let changed = compact_positions(&conn, OrderedTable::Tasks, "c").unwrap();

        assert!(changed > 0);
        assert_eq!(positions(&conn, OrderedTable::Tasks, "c").unwrap(), vec![0, 1, 2, 3]);
        // t1 and t2 tied on 1; t1 was created first
        assert_eq!(
            child_ids(&conn, OrderedTable::Tasks, "c").unwrap(),
            vec!["t1", "t2", "t3", "t0"]
        );
    }
}
