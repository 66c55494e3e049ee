// Integration tests for the migration runner against a file database

use kanflow_store::migrations::{applied_migrations, apply_migrations};
use tempfile::TempDir;

#[test]
fn test_migrations_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("store.db");

    {
        let mut conn = kanflow_store::db::open(&path).unwrap();
        apply_migrations(&mut conn).unwrap();
    }

    let mut conn = kanflow_store::db::open(&path).unwrap();
    apply_migrations(&mut conn).unwrap();

    let applied = applied_migrations(&conn).unwrap();
    assert_eq!(applied.len(), 2);
}

#[test]
fn test_schema_tables_exist() {
    let mut conn = kanflow_store::db::open_in_memory().unwrap();
    apply_migrations(&mut conn).unwrap();

    for table in ["projects", "boards", "board_columns", "tasks", "schema_version"] {
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
                [table],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1, "missing table {table}");
    }
}

#[test]
fn test_position_indexes_are_not_unique() {
    let mut conn = kanflow_store::db::open_in_memory().unwrap();
    apply_migrations(&mut conn).unwrap();

    let unique: i64 = conn
        .query_row(
            "SELECT \"unique\" FROM pragma_index_list('tasks')
             WHERE name = 'idx_tasks_column_position'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(unique, 0);
}
