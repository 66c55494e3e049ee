// Integration tests for board and task hydration

use kanflow_core::model::{Board, Column, Project, Task};
use kanflow_store::repo::{hydration, SqliteRepo};
use rusqlite::Connection;

fn setup_test_db() -> Connection {
    let mut conn = kanflow_store::db::open_in_memory().unwrap();
    kanflow_store::migrations::apply_migrations(&mut conn).unwrap();
    SqliteRepo::insert_project(&conn, &Project::new("p1".to_string(), "P".to_string())).unwrap();
    SqliteRepo::insert_board(
        &conn,
        &Board::new("b1".to_string(), "p1".to_string(), "Board".to_string()),
    )
    .unwrap();
    conn
}

#[test]
fn test_load_board_orders_columns_and_tasks_by_position() {
    let conn = setup_test_db();
    // Inserted out of order on purpose
    for (id, pos) in [("c-done", 2), ("c-todo", 0), ("c-doing", 1)] {
        let column = Column::new(id.to_string(), "b1".to_string(), id.to_string(), pos);
        SqliteRepo::insert_column(&conn, &column).unwrap();
    }
    for (id, pos) in [("t2", 2), ("t0", 0), ("t1", 1)] {
        let task = Task::new(id.to_string(), "c-todo".to_string(), format!("Task {id}"), pos);
        SqliteRepo::insert_task(&conn, &task).unwrap();
    }

    let view = hydration::load_board(&conn, "b1").unwrap().unwrap();

    let column_ids: Vec<&str> = view.columns.iter().map(|c| c.column.id.as_str()).collect();
    assert_eq!(column_ids, vec!["c-todo", "c-doing", "c-done"]);

    let todo = view.column("c-todo").unwrap();
    let task_ids: Vec<&str> = todo.tasks.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(task_ids, vec!["t0", "t1", "t2"]);
    assert!(view.column("c-done").unwrap().tasks.is_empty());
}

#[test]
fn test_load_missing_board() {
    let conn = setup_test_db();
    assert!(hydration::load_board(&conn, "nope").unwrap().is_none());
}

#[test]
fn test_load_task_detail_includes_relations() {
    let conn = setup_test_db();
    let column = Column::new("c1".to_string(), "b1".to_string(), "To Do".to_string(), 0);
    SqliteRepo::insert_column(&conn, &column).unwrap();
    let task = Task::new("t1".to_string(), "c1".to_string(), "Write docs".to_string(), 0);
    SqliteRepo::insert_task(&conn, &task).unwrap();

    let detail = hydration::load_task_detail(&conn, "t1").unwrap().unwrap();

    assert_eq!(detail.task.id, "t1");
    assert_eq!(detail.column.id, "c1");
    assert_eq!(detail.board.id, "b1");
}

#[test]
fn test_board_view_serializes_flat() {
    let conn = setup_test_db();
    let view = hydration::load_board(&conn, "b1").unwrap().unwrap();

    let json = serde_json::to_value(&view).unwrap();

    assert_eq!(json["id"], "b1");
    assert_eq!(json["project_id"], "p1");
    assert!(json["columns"].as_array().unwrap().is_empty());
}
