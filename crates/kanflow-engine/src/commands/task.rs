//! Task command handlers, including the Move Engine
//!
//! `task_move` reads the task and target column, consults admission control,
//! plans the shifts with `plan_move` and applies them, all inside one
//! `IMMEDIATE` transaction. Any failure drops the transaction and leaves
//! every container exactly as it was.

#![allow(clippy::result_large_err)]

use super::container::reorder_in_tx;
use super::{begin_immediate, elapsed_ms, new_id, require_column, require_task};
use chrono::NaiveDate;
use kanflow_core::admission::check_admission;
use kanflow_core::errors::KanbanError;
use kanflow_core::model::{Task, TaskDetail, TaskPriority, TaskType};
use kanflow_core::ordering::{next_position, plan_move, MovePlan, OrderedTable, ShiftRange};
use kanflow_core::rules::validation::{
    validate_assignee, validate_story_points, validate_task_title,
};
use kanflow_core::{log_op_end, log_op_error, log_op_start};
use kanflow_store::errors::{from_rusqlite, Result};
use kanflow_store::repo::{container, hydration, SqliteRepo};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskCreate {
    pub column_id: String,
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<TaskPriority>,
    pub task_type: Option<TaskType>,
    pub story_points: Option<u32>,
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub assignee: Option<String>,
    /// Explicit slot; stored as given. Appended when absent.
    pub position: Option<u32>,
}

/// Partial task update; `None` leaves a field as it is, `Some(None)` clears it
///
/// A `column_id` different from the current one relocates the task to the
/// end of that column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskUpdate {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "super::nullable", skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    pub priority: Option<TaskPriority>,
    pub task_type: Option<TaskType>,
    #[serde(default, deserialize_with = "super::nullable", skip_serializing_if = "Option::is_none")]
    pub story_points: Option<Option<u32>>,
    #[serde(default, deserialize_with = "super::nullable", skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Option<NaiveDate>>,
    pub tags: Option<Vec<String>>,
    #[serde(default, deserialize_with = "super::nullable", skip_serializing_if = "Option::is_none")]
    pub assignee: Option<Option<String>>,
    pub column_id: Option<String>,
}

fn load_detail(conn: &Connection, task_id: &str) -> Result<TaskDetail> {
    hydration::load_task_detail(conn, task_id)?.ok_or_else(|| {
        KanbanError::TaskNotFound {
            task_id: task_id.to_string(),
        }
        .into()
    })
}

// ===== Create =====

/// Create a task in a column
///
/// ## Errors
///
/// - `NotFound`: unknown column
/// - `AdmissionDenied`: the column is at its WIP limit
/// - `InvalidInput`: field validation
pub fn task_create(input: TaskCreate, conn: &mut Connection) -> Result<TaskDetail> {
    log_op_start!("task_create", column_id = %input.column_id);
    let start = std::time::Instant::now();

    let column_id = input.column_id.clone();
    let result = task_create_impl(input, conn).map_err(|e| {
        log_op_error!(
            "task_create",
            e.clone(),
            duration_ms = elapsed_ms(start),
            column_id = %column_id
        );
        e
    })?;

    log_op_end!(
        "task_create",
        duration_ms = elapsed_ms(start),
        task_id = %result.task.id,
        position = result.task.position
    );
    Ok(result)
}

fn task_create_impl(input: TaskCreate, conn: &mut Connection) -> Result<TaskDetail> {
    validate_task_title(&input.title)?;
    if let Some(points) = input.story_points {
        validate_story_points(points)?;
    }
    if let Some(assignee) = &input.assignee {
        validate_assignee(assignee)?;
    }

    let tx = begin_immediate(conn)?;
    let column = require_column(&tx, &input.column_id)?;
    let count = container::child_count(&tx, OrderedTable::Tasks, &column.id)?;
    check_admission(&column, count, true)?;

    let position = match input.position {
        Some(position) => position,
        None => next_position(container::max_position(&tx, OrderedTable::Tasks, &column.id)?),
    };

    let mut task = Task::new(new_id(), column.id.clone(), input.title.trim().to_string(), position);
    task.description = input.description;
    task.priority = input.priority.unwrap_or_default();
    task.task_type = input.task_type.unwrap_or_default();
    task.story_points = input.story_points;
    task.due_date = input.due_date;
    task.tags = input.tags;
    task.assignee = input.assignee;
    SqliteRepo::insert_task(&tx, &task)?;

    let detail = load_detail(&tx, &task.id)?;
    tx.commit().map_err(from_rusqlite)?;
    Ok(detail)
}

// ===== Reads =====

/// A task with its column and board
pub fn task_get(task_id: &str, conn: &Connection) -> Result<TaskDetail> {
    load_detail(conn, task_id)
}

/// Tasks of a column in position order
pub fn task_list(column_id: &str, conn: &Connection) -> Result<Vec<Task>> {
    require_column(conn, column_id)?;
    SqliteRepo::list_tasks(conn, column_id)
}

/// Case-insensitive substring search over title, description and assignee
pub fn task_search(query: &str, conn: &Connection) -> Result<Vec<Task>> {
    log_op_start!("task_search");
    let start = std::time::Instant::now();

    let result = SqliteRepo::search_tasks(conn, query).map_err(|e| {
        log_op_error!("task_search", e.clone(), duration_ms = elapsed_ms(start));
        e
    })?;

    log_op_end!(
        "task_search",
        duration_ms = elapsed_ms(start),
        child_count = result.len()
    );
    Ok(result)
}

// ===== Move =====

/// Move a task to `new_position` in `target_column_id`
///
/// `new_position` is clamped: within one column to `[0, count - 1]`, into
/// another column to `[0, target_count]`. The returned task carries the
/// position actually stored.
///
/// ## Errors
///
/// - `NotFound`: unknown task or target column
/// - `AdmissionDenied`: cross-column move into a full column
/// - `Persistence` / `Concurrency`: storage failure, nothing is applied
pub fn task_move(
    task_id: &str,
    target_column_id: &str,
    new_position: u32,
    conn: &mut Connection,
) -> Result<TaskDetail> {
    log_op_start!(
        "task_move",
        task_id = task_id,
        column_id = target_column_id,
        position = new_position
    );
    let start = std::time::Instant::now();

    let result = task_move_impl(task_id, target_column_id, new_position, conn).map_err(|e| {
        log_op_error!(
            "task_move",
            e.clone(),
            duration_ms = elapsed_ms(start),
            task_id = task_id
        );
        e
    })?;

    log_op_end!(
        "task_move",
        duration_ms = elapsed_ms(start),
        position = result.task.position
    );
    Ok(result)
}

fn task_move_impl(
    task_id: &str,
    target_column_id: &str,
    new_position: u32,
    conn: &mut Connection,
) -> Result<TaskDetail> {
    let tx = begin_immediate(conn)?;
    relocate(&tx, task_id, target_column_id, new_position)?;
    let detail = load_detail(&tx, task_id)?;
    tx.commit().map_err(from_rusqlite)?;
    Ok(detail)
}

/// Plan and apply one move on an open transaction
///
/// Shared by `task_move` and a column-changing `task_update`.
fn relocate(
    conn: &Connection,
    task_id: &str,
    target_column_id: &str,
    requested_position: u32,
) -> Result<MovePlan> {
    let task = require_task(conn, task_id)?;
    let target = require_column(conn, target_column_id)?;
    let target_count = container::child_count(conn, OrderedTable::Tasks, &target.id)?;
    let cross_column = task.column_id != target.id;

    check_admission(&target, target_count, cross_column)?;

    let plan = plan_move(
        &task.column_id,
        task.position,
        &target.id,
        target_count,
        requested_position,
    );
    if plan.is_noop() {
        return Ok(plan);
    }

    let mut shifted = 0;
    for range in &plan.shifts {
        shifted += container::shift_positions(conn, OrderedTable::Tasks, range)?;
    }
    SqliteRepo::relocate_task(
        conn,
        &task.id,
        &plan.target_parent,
        plan.final_position,
        chrono::Utc::now(),
    )?;

    tracing::debug!(
        task_id = %task.id,
        from = %plan.source_parent,
        to = %plan.target_parent,
        old_position = plan.old_position,
        position = plan.final_position,
        shifted_rows = shifted,
        "Applied move plan"
    );
    Ok(plan)
}

// ===== Update =====

pub fn task_update(task_id: &str, input: TaskUpdate, conn: &mut Connection) -> Result<TaskDetail> {
    log_op_start!("task_update", task_id = task_id);
    let start = std::time::Instant::now();

    let result = task_update_impl(task_id, input, conn).map_err(|e| {
        log_op_error!(
            "task_update",
            e.clone(),
            duration_ms = elapsed_ms(start),
            task_id = task_id
        );
        e
    })?;

    log_op_end!(
        "task_update",
        duration_ms = elapsed_ms(start),
        column_id = %result.column.id,
        position = result.task.position
    );
    Ok(result)
}

fn task_update_impl(task_id: &str, input: TaskUpdate, conn: &mut Connection) -> Result<TaskDetail> {
    if let Some(title) = &input.title {
        validate_task_title(title)?;
    }
    if let Some(Some(points)) = input.story_points {
        validate_story_points(points)?;
    }
    if let Some(Some(assignee)) = &input.assignee {
        validate_assignee(assignee)?;
    }

    let tx = begin_immediate(conn)?;
    let mut task = require_task(&tx, task_id)?;

    if let Some(title) = input.title {
        task.title = title.trim().to_string();
    }
    if let Some(description) = input.description {
        task.description = description;
    }
    if let Some(priority) = input.priority {
        task.priority = priority;
    }
    if let Some(task_type) = input.task_type {
        task.task_type = task_type;
    }
    if let Some(points) = input.story_points {
        task.story_points = points;
    }
    if let Some(due_date) = input.due_date {
        task.due_date = due_date;
    }
    if let Some(tags) = input.tags {
        task.tags = tags;
    }
    if let Some(assignee) = input.assignee {
        task.assignee = assignee;
    }
    task.updated_at = chrono::Utc::now();
    SqliteRepo::update_task(&tx, &task)?;

    if let Some(column_id) = input.column_id.filter(|c| *c != task.column_id) {
        // Past-the-end request: plan_move clamps it to the target count
        relocate(&tx, &task.id, &column_id, u32::MAX)?;
    }

    let detail = load_detail(&tx, &task.id)?;
    tx.commit().map_err(from_rusqlite)?;
    Ok(detail)
}

// ===== Delete =====

/// Delete a task, closing the gap it leaves in its column
pub fn task_delete(task_id: &str, conn: &mut Connection) -> Result<()> {
    log_op_start!("task_delete", task_id = task_id);
    let start = std::time::Instant::now();

    let shifted = task_delete_impl(task_id, conn).map_err(|e| {
        log_op_error!(
            "task_delete",
            e.clone(),
            duration_ms = elapsed_ms(start),
            task_id = task_id
        );
        e
    })?;

    log_op_end!(
        "task_delete",
        duration_ms = elapsed_ms(start),
        shifted_rows = shifted
    );
    Ok(())
}

fn task_delete_impl(task_id: &str, conn: &mut Connection) -> Result<usize> {
    let tx = begin_immediate(conn)?;
    let task = require_task(&tx, task_id)?;

    SqliteRepo::delete_task(&tx, task_id)?;
    let shifted = container::shift_positions(
        &tx,
        OrderedTable::Tasks,
        &ShiftRange::closing_gap_after(&task.column_id, task.position),
    )?;

    tx.commit().map_err(from_rusqlite)?;
    Ok(shifted)
}

// ===== Reorder =====

/// Reorder all tasks of a column
///
/// ## Errors
///
/// - `NotFound`: unknown column
/// - `InvalidArgument`: `ordered_ids` is not a permutation of the column's tasks
pub fn task_reorder(column_id: &str, ordered_ids: &[String], conn: &mut Connection) -> Result<Vec<Task>> {
    log_op_start!(
        "task_reorder",
        column_id = column_id,
        child_count = ordered_ids.len()
    );
    let start = std::time::Instant::now();

    let result = task_reorder_impl(column_id, ordered_ids, conn).map_err(|e| {
        log_op_error!(
            "task_reorder",
            e.clone(),
            duration_ms = elapsed_ms(start),
            column_id = column_id
        );
        e
    })?;

    log_op_end!("task_reorder", duration_ms = elapsed_ms(start));
    Ok(result)
}

fn task_reorder_impl(column_id: &str, ordered_ids: &[String], conn: &mut Connection) -> Result<Vec<Task>> {
    let tx = begin_immediate(conn)?;
    reorder_in_tx(&tx, OrderedTable::Tasks, column_id, ordered_ids)?;
    let tasks = SqliteRepo::list_tasks(&tx, column_id)?;
    tx.commit().map_err(from_rusqlite)?;
    Ok(tasks)
}
