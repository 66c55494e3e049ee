//! CLI integration tests
//!
//! Each test drives the `kanflow` binary against a fresh database file and
//! inspects the JSON it prints.

use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn db_path(temp_dir: &TempDir) -> PathBuf {
    temp_dir.path().join("nested").join("store.db")
}

fn run(db: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_kanflow"))
        .arg("--db")
        .arg(db)
        .args(["--log-profile", "test"])
        .args(args)
        .output()
        .expect("Failed to execute CLI")
}

fn run_json(db: &Path, args: &[&str]) -> Value {
    let output = run(db, args);
    assert!(
        output.status.success(),
        "kanflow {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

fn str_field<'a>(value: &'a Value, key: &str) -> &'a str {
    value[key].as_str().unwrap()
}

/// Creates a project and a board; returns the board view
fn seed_board(db: &Path) -> Value {
    let project = run_json(db, &["project", "create", "Apollo"]);
    run_json(db, &["board", "create", str_field(&project, "id"), "Sprint 1"])
}

fn column_id(board: &Value, index: usize) -> String {
    board["columns"][index]["id"].as_str().unwrap().to_string()
}

fn titles(tasks: &Value) -> Vec<String> {
    tasks
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn test_board_create_seeds_default_columns_and_creates_db_dir() {
    let temp_dir = TempDir::new().unwrap();
    let db = db_path(&temp_dir);

    let board = seed_board(&db);

    assert!(db.exists());
    let names: Vec<&str> = board["columns"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Backlog", "To Do", "In Progress", "In Review", "Done"]);
}

#[test]
fn test_task_move_across_columns() {
    let temp_dir = TempDir::new().unwrap();
    let db = db_path(&temp_dir);
    let board = seed_board(&db);
    let backlog = column_id(&board, 0);
    let todo = column_id(&board, 1);

    let a = run_json(&db, &["task", "create", &backlog, "Task A"]);
    run_json(&db, &["task", "create", &backlog, "Task B"]);
    run_json(&db, &["task", "create", &todo, "Task X"]);

    let moved = run_json(&db, &["task", "move", str_field(&a, "id"), &todo, "0"]);
    assert_eq!(moved["column_id"], todo.as_str());
    assert_eq!(moved["position"], 0);
    assert_eq!(moved["column"]["name"], "To Do");

    assert_eq!(titles(&run_json(&db, &["task", "list", &backlog])), ["Task B"]);
    assert_eq!(titles(&run_json(&db, &["task", "list", &todo])), ["Task A", "Task X"]);
}

#[test]
fn test_wip_limit_rejects_move_with_admission_code() {
    let temp_dir = TempDir::new().unwrap();
    let db = db_path(&temp_dir);
    let board = seed_board(&db);
    let backlog = column_id(&board, 0);
    let doing = column_id(&board, 2);

    run_json(&db, &["column", "update", &doing, "--task-limit", "1"]);
    run_json(&db, &["task", "create", &doing, "Busy"]);
    let waiting = run_json(&db, &["task", "create", &backlog, "Waiting"]);

    let output = run(&db, &["task", "move", str_field(&waiting, "id"), &doing, "0"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERR_ADMISSION_DENIED"), "stderr: {}", stderr);
    assert_eq!(titles(&run_json(&db, &["task", "list", &backlog])), ["Waiting"]);
}

#[test]
fn test_column_reorder_and_rejected_partial_list() {
    let temp_dir = TempDir::new().unwrap();
    let db = db_path(&temp_dir);
    let board = seed_board(&db);
    let ids: Vec<String> = (0..5).map(|i| column_id(&board, i)).collect();
    let board_id = str_field(&board, "id").to_string();

    let mut reversed: Vec<&str> = ids.iter().rev().map(String::as_str).collect();
    let mut args = vec!["column", "reorder", board_id.as_str()];
    args.extend(reversed.iter().copied());
    let columns = run_json(&db, &args);
    let names: Vec<&str> = columns
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Done", "In Review", "In Progress", "To Do", "Backlog"]);

    reversed.pop();
    let mut args = vec!["column", "reorder", board_id.as_str()];
    args.extend(reversed.iter().copied());
    let output = run(&db, &args);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("ERR_INVALID_ARGUMENT"));
}

#[test]
fn test_apply_json_command() {
    let temp_dir = TempDir::new().unwrap();
    let db = db_path(&temp_dir);
    let board = seed_board(&db);
    let todo = column_id(&board, 1);

    let command = serde_json::json!({
        "command": "task_create",
        "column_id": todo,
        "title": "From JSON",
        "priority": "high",
        "tags": ["api"],
    });
    let task = run_json(&db, &["apply", &command.to_string()]);

    assert_eq!(task["title"], "From JSON");
    assert_eq!(task["priority"], "high");
    assert_eq!(task["tags"], serde_json::json!(["api"]));
}

#[test]
fn test_task_get_unknown_id_fails_with_not_found() {
    let temp_dir = TempDir::new().unwrap();
    let db = db_path(&temp_dir);

    let output = run(&db, &["task", "get", "missing"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("ERR_NOT_FOUND"));
}

#[test]
fn test_errors_carry_trace_id() {
    let temp_dir = TempDir::new().unwrap();
    let db = db_path(&temp_dir);

    let output = run(&db, &["--trace-id", "sync-7", "column", "get", "missing"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("(trace_id: sync-7)"), "stderr: {}", stderr);
    assert!(stderr.contains("request_id: "));
}

#[test]
fn test_task_update_unassign_clears_assignee() {
    let temp_dir = TempDir::new().unwrap();
    let db = db_path(&temp_dir);
    let board = seed_board(&db);
    let todo = column_id(&board, 1);

    let task = run_json(&db, &["task", "create", &todo, "Review PR", "--assignee", "Ana"]);
    assert_eq!(task["assignee"], "Ana");

    let updated = run_json(&db, &["task", "update", str_field(&task, "id"), "--unassign"]);
    assert!(updated["assignee"].is_null());
    assert_eq!(updated["title"], "Review PR");
}
