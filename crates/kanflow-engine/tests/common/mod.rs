// Shared fixtures for engine integration tests

use kanflow_core::model::{BoardView, Column};
use kanflow_core::ordering::OrderedTable;
use kanflow_engine::commands::board::{board_create, BoardCreate};
use kanflow_engine::commands::column::{column_create, ColumnCreate};
use kanflow_engine::commands::project::{project_create, ProjectCreate};
use kanflow_engine::commands::task::{task_create, TaskCreate};
use rusqlite::Connection;
use tempfile::TempDir;

pub fn setup_db() -> (TempDir, Connection) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let mut conn = kanflow_store::db::open(&db_path).unwrap();
    kanflow_store::migrations::apply_migrations(&mut conn).unwrap();
    (temp_dir, conn)
}

/// A project with one board (and its default columns)
#[allow(dead_code)]
pub fn seed_board(conn: &mut Connection) -> BoardView {
    let project = project_create(
        ProjectCreate {
            name: "Website".to_string(),
            ..Default::default()
        },
        conn,
    )
    .unwrap();
    board_create(
        BoardCreate {
            project_id: project.id,
            name: "Sprint 1".to_string(),
            description: None,
        },
        conn,
    )
    .unwrap()
}

#[allow(dead_code)]
pub fn add_column(conn: &mut Connection, board_id: &str, name: &str, task_limit: Option<u32>) -> Column {
    column_create(
        ColumnCreate {
            board_id: board_id.to_string(),
            name: name.to_string(),
            task_limit,
            ..Default::default()
        },
        conn,
    )
    .unwrap()
}

/// Create tasks named `titles` in order; returns their ids
#[allow(dead_code)]
pub fn add_tasks(conn: &mut Connection, column_id: &str, titles: &[&str]) -> Vec<String> {
    titles
        .iter()
        .map(|title| {
            task_create(
                TaskCreate {
                    column_id: column_id.to_string(),
                    title: title.to_string(),
                    ..Default::default()
                },
                conn,
            )
            .unwrap()
            .task
            .id
        })
        .collect()
}

/// Child ids of a container in position order
#[allow(dead_code)]
pub fn order(conn: &Connection, table: OrderedTable, parent_id: &str) -> Vec<String> {
    kanflow_store::repo::container::child_ids(conn, table, parent_id).unwrap()
}

#[allow(dead_code)]
pub fn positions(conn: &Connection, table: OrderedTable, parent_id: &str) -> Vec<u32> {
    kanflow_store::repo::container::positions(conn, table, parent_id).unwrap()
}

#[allow(dead_code)]
pub fn assert_dense(conn: &Connection, table: OrderedTable, parent_id: &str) {
    let positions = positions(conn, table, parent_id);
    kanflow_core::rules::check_density(parent_id, positions.iter().copied())
        .unwrap_or_else(|e| panic!("container {parent_id} not dense: {e} ({positions:?})"));
}
