//! SQLite repository implementation
//!
//! Row-level persistence for projects, boards, columns and tasks. Positions
//! are written here only on insert; every later position change goes
//! through `repo::container`.

#![allow(clippy::result_large_err)]

use crate::errors::{from_rusqlite, Result};
use chrono::{DateTime, NaiveDate, Utc};
use kanflow_core::errors::KanbanError;
use kanflow_core::model::{
    Board, Column, Project, ProjectStatus, Task, TaskPriority, TaskType,
};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row};

const PROJECT_COLUMNS: &str =
    "id, name, description, color, icon, status, created_at, updated_at";
const BOARD_COLUMNS: &str = "id, project_id, name, description, created_at, updated_at";
const COLUMN_COLUMNS: &str =
    "id, board_id, name, color, position, task_limit, created_at, updated_at";
const TASK_COLUMNS: &str = "id, column_id, title, description, priority, task_type, position, \
     story_points, due_date, tags, assignee, created_at, updated_at";

const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Wrap a decode failure so it can leave a row mapper
fn conversion_error(index: usize, ty: Type, err: KanbanError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(index, ty, Box::new(err))
}

fn timestamp(row: &Row<'_>, index: usize) -> rusqlite::Result<DateTime<Utc>> {
    let ms: i64 = row.get(index)?;
    DateTime::from_timestamp_millis(ms).ok_or_else(|| {
        conversion_error(
            index,
            Type::Integer,
            KanbanError::Serialization {
                message: format!("timestamp {} is out of range", ms),
            },
        )
    })
}

fn project_from_row(row: &Row<'_>) -> rusqlite::Result<Project> {
    let status: String = row.get(5)?;
    Ok(Project {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        color: row.get(3)?,
        icon: row.get(4)?,
        status: ProjectStatus::parse(&status).map_err(|e| conversion_error(5, Type::Text, e))?,
        created_at: timestamp(row, 6)?,
        updated_at: timestamp(row, 7)?,
    })
}

fn board_from_row(row: &Row<'_>) -> rusqlite::Result<Board> {
    Ok(Board {
        id: row.get(0)?,
        project_id: row.get(1)?,
        name: row.get(2)?,
        description: row.get(3)?,
        created_at: timestamp(row, 4)?,
        updated_at: timestamp(row, 5)?,
    })
}

fn column_from_row(row: &Row<'_>) -> rusqlite::Result<Column> {
    Ok(Column {
        id: row.get(0)?,
        board_id: row.get(1)?,
        name: row.get(2)?,
        color: row.get(3)?,
        position: row.get(4)?,
        task_limit: row.get(5)?,
        created_at: timestamp(row, 6)?,
        updated_at: timestamp(row, 7)?,
    })
}

fn task_from_row(row: &Row<'_>) -> rusqlite::Result<Task> {
    let priority: String = row.get(4)?;
    let task_type: String = row.get(5)?;
    let due_date: Option<String> = row.get(8)?;
    let tags: String = row.get(9)?;

    Ok(Task {
        id: row.get(0)?,
        column_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        priority: TaskPriority::parse(&priority).map_err(|e| conversion_error(4, Type::Text, e))?,
        task_type: TaskType::parse(&task_type).map_err(|e| conversion_error(5, Type::Text, e))?,
        position: row.get(6)?,
        story_points: row.get(7)?,
        due_date: due_date
            .as_deref()
            .map(|d| {
                NaiveDate::parse_from_str(d, DUE_DATE_FORMAT).map_err(|e| {
                    conversion_error(
                        8,
                        Type::Text,
                        KanbanError::Serialization {
                            message: format!("due date {:?}: {}", d, e),
                        },
                    )
                })
            })
            .transpose()?,
        tags: serde_json::from_str(&tags)
            .map_err(|e| conversion_error(9, Type::Text, e.into()))?,
        assignee: row.get(10)?,
        created_at: timestamp(row, 11)?,
        updated_at: timestamp(row, 12)?,
    })
}

/// SQLite repository for the kanban hierarchy
pub struct SqliteRepo;

impl SqliteRepo {
    // ===== Projects =====

    pub fn insert_project(conn: &Connection, project: &Project) -> Result<()> {
        conn.execute(
            "INSERT INTO projects (id, name, description, color, icon, status, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            rusqlite::params![
                project.id,
                project.name,
                project.description,
                project.color,
                project.icon,
                project.status.as_str(),
                project.created_at.timestamp_millis(),
                project.updated_at.timestamp_millis(),
            ],
        )
        .map_err(from_rusqlite)?;

        Ok(())
    }

    pub fn update_project(conn: &Connection, project: &Project) -> Result<usize> {
        conn.execute(
            "UPDATE projects SET name = ?2, description = ?3, color = ?4, icon = ?5,
                status = ?6, updated_at = ?7
             WHERE id = ?1",
            rusqlite::params![
                project.id,
                project.name,
                project.description,
                project.color,
                project.icon,
                project.status.as_str(),
                project.updated_at.timestamp_millis(),
            ],
        )
        .map_err(from_rusqlite)
    }

    pub fn get_project(conn: &Connection, project_id: &str) -> Result<Option<Project>> {
        conn.query_row(
            &format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = ?1"),
            [project_id],
            project_from_row,
        )
        .optional()
        .map_err(from_rusqlite)
    }

    /// All projects, newest first
    pub fn list_projects(conn: &Connection) -> Result<Vec<Project>> {
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {PROJECT_COLUMNS} FROM projects ORDER BY created_at DESC, id DESC"
            ))
            .map_err(from_rusqlite)?;
        let projects = stmt
            .query_map([], project_from_row)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;
        Ok(projects)
    }

    /// Delete a project; boards, columns and tasks go with it
    pub fn delete_project(conn: &Connection, project_id: &str) -> Result<usize> {
        conn.execute("DELETE FROM projects WHERE id = ?1", [project_id])
            .map_err(from_rusqlite)
    }

    // ===== Boards =====

    pub fn insert_board(conn: &Connection, board: &Board) -> Result<()> {
        conn.execute(
            "INSERT INTO boards (id, project_id, name, description, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            rusqlite::params![
                board.id,
                board.project_id,
                board.name,
                board.description,
                board.created_at.timestamp_millis(),
                board.updated_at.timestamp_millis(),
            ],
        )
        .map_err(from_rusqlite)?;

        Ok(())
    }

    pub fn update_board(conn: &Connection, board: &Board) -> Result<usize> {
        conn.execute(
            "UPDATE boards SET name = ?2, description = ?3, updated_at = ?4 WHERE id = ?1",
            rusqlite::params![
                board.id,
                board.name,
                board.description,
                board.updated_at.timestamp_millis(),
            ],
        )
        .map_err(from_rusqlite)
    }

    pub fn get_board(conn: &Connection, board_id: &str) -> Result<Option<Board>> {
        conn.query_row(
            &format!("SELECT {BOARD_COLUMNS} FROM boards WHERE id = ?1"),
            [board_id],
            board_from_row,
        )
        .optional()
        .map_err(from_rusqlite)
    }

    /// Boards of a project, newest first
    pub fn list_boards(conn: &Connection, project_id: &str) -> Result<Vec<Board>> {
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {BOARD_COLUMNS} FROM boards WHERE project_id = ?1
                 ORDER BY created_at DESC, id DESC"
            ))
            .map_err(from_rusqlite)?;
        let boards = stmt
            .query_map([project_id], board_from_row)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;
        Ok(boards)
    }

    pub fn delete_board(conn: &Connection, board_id: &str) -> Result<usize> {
        conn.execute("DELETE FROM boards WHERE id = ?1", [board_id])
            .map_err(from_rusqlite)
    }

    // ===== Columns =====

    pub fn insert_column(conn: &Connection, column: &Column) -> Result<()> {
        conn.execute(
            "INSERT INTO board_columns (id, board_id, name, color, position, task_limit, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            rusqlite::params![
                column.id,
                column.board_id,
                column.name,
                column.color,
                column.position,
                column.task_limit,
                column.created_at.timestamp_millis(),
                column.updated_at.timestamp_millis(),
            ],
        )
        .map_err(from_rusqlite)?;

        Ok(())
    }

    /// Update a column's descriptive fields; `position` is left alone
    pub fn update_column(conn: &Connection, column: &Column) -> Result<usize> {
        conn.execute(
            "UPDATE board_columns SET name = ?2, color = ?3, task_limit = ?4, updated_at = ?5
             WHERE id = ?1",
            rusqlite::params![
                column.id,
                column.name,
                column.color,
                column.task_limit,
                column.updated_at.timestamp_millis(),
            ],
        )
        .map_err(from_rusqlite)
    }

    pub fn get_column(conn: &Connection, column_id: &str) -> Result<Option<Column>> {
        conn.query_row(
            &format!("SELECT {COLUMN_COLUMNS} FROM board_columns WHERE id = ?1"),
            [column_id],
            column_from_row,
        )
        .optional()
        .map_err(from_rusqlite)
    }

    /// Columns of a board in position order
    pub fn list_columns(conn: &Connection, board_id: &str) -> Result<Vec<Column>> {
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {COLUMN_COLUMNS} FROM board_columns WHERE board_id = ?1
                 ORDER BY position, created_at, id"
            ))
            .map_err(from_rusqlite)?;
        let columns = stmt
            .query_map([board_id], column_from_row)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;
        Ok(columns)
    }

    pub fn delete_column(conn: &Connection, column_id: &str) -> Result<usize> {
        conn.execute("DELETE FROM board_columns WHERE id = ?1", [column_id])
            .map_err(from_rusqlite)
    }

    // ===== Tasks =====

    pub fn insert_task(conn: &Connection, task: &Task) -> Result<()> {
        let tags = serde_json::to_string(&task.tags).unwrap_or_else(|_| "[]".to_string());
        conn.execute(
            &format!(
                "INSERT INTO tasks ({TASK_COLUMNS})
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)"
            ),
            rusqlite::params![
                task.id,
                task.column_id,
                task.title,
                task.description,
                task.priority.as_str(),
                task.task_type.as_str(),
                task.position,
                task.story_points,
                task.due_date.map(|d| d.format(DUE_DATE_FORMAT).to_string()),
                tags,
                task.assignee,
                task.created_at.timestamp_millis(),
                task.updated_at.timestamp_millis(),
            ],
        )
        .map_err(from_rusqlite)?;

        Ok(())
    }

    /// Update a task's descriptive fields; `column_id` and `position` are left alone
    pub fn update_task(conn: &Connection, task: &Task) -> Result<usize> {
        let tags = serde_json::to_string(&task.tags).unwrap_or_else(|_| "[]".to_string());
        conn.execute(
            "UPDATE tasks SET title = ?2, description = ?3, priority = ?4, task_type = ?5,
                story_points = ?6, due_date = ?7, tags = ?8, assignee = ?9, updated_at = ?10
             WHERE id = ?1",
            rusqlite::params![
                task.id,
                task.title,
                task.description,
                task.priority.as_str(),
                task.task_type.as_str(),
                task.story_points,
                task.due_date.map(|d| d.format(DUE_DATE_FORMAT).to_string()),
                tags,
                task.assignee,
                task.updated_at.timestamp_millis(),
            ],
        )
        .map_err(from_rusqlite)
    }

    /// Re-parent a task into `column_id` at `position`
    pub fn relocate_task(
        conn: &Connection,
        task_id: &str,
        column_id: &str,
        position: u32,
        updated_at: DateTime<Utc>,
    ) -> Result<usize> {
        conn.execute(
            "UPDATE tasks SET column_id = ?2, position = ?3, updated_at = ?4 WHERE id = ?1",
            rusqlite::params![task_id, column_id, position, updated_at.timestamp_millis()],
        )
        .map_err(from_rusqlite)
    }

    pub fn get_task(conn: &Connection, task_id: &str) -> Result<Option<Task>> {
        conn.query_row(
            &format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1"),
            [task_id],
            task_from_row,
        )
        .optional()
        .map_err(from_rusqlite)
    }

    /// Tasks of a column in position order
    pub fn list_tasks(conn: &Connection, column_id: &str) -> Result<Vec<Task>> {
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {TASK_COLUMNS} FROM tasks WHERE column_id = ?1
                 ORDER BY position, created_at, id"
            ))
            .map_err(from_rusqlite)?;
        let tasks = stmt
            .query_map([column_id], task_from_row)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;
        Ok(tasks)
    }

    /// Tasks whose title, description or assignee contains `query`
    ///
    /// Case-insensitive for ASCII, newest first.
    pub fn search_tasks(conn: &Connection, query: &str) -> Result<Vec<Task>> {
        let escaped = query
            .replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_");
        let pattern = format!("%{}%", escaped);

        let mut stmt = conn
            .prepare(&format!(
                "SELECT {TASK_COLUMNS} FROM tasks
                 WHERE title LIKE ?1 ESCAPE '\\'
                    OR description LIKE ?1 ESCAPE '\\'
                    OR assignee LIKE ?1 ESCAPE '\\'
                 ORDER BY created_at DESC, id DESC"
            ))
            .map_err(from_rusqlite)?;
        let tasks = stmt
            .query_map([pattern], task_from_row)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;
        Ok(tasks)
    }

    pub fn delete_task(conn: &Connection, task_id: &str) -> Result<usize> {
        conn.execute("DELETE FROM tasks WHERE id = ?1", [task_id])
            .map_err(from_rusqlite)
    }
}
