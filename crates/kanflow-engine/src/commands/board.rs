//! Board command handlers
//!
//! A new board is seeded with the default column set in the same
//! transaction that creates it.

#![allow(clippy::result_large_err)]

use super::{begin_immediate, elapsed_ms, new_id, require_board, require_project};
use kanflow_core::errors::KanbanError;
use kanflow_core::model::board::DEFAULT_COLUMNS;
use kanflow_core::model::{Board, BoardView, Column};
use kanflow_core::rules::validation::validate_board_name;
use kanflow_core::{log_op_end, log_op_error, log_op_start};
use kanflow_store::errors::{from_rusqlite, Result};
use kanflow_store::repo::{hydration, SqliteRepo};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardCreate {
    pub project_id: String,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardUpdate {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "super::nullable", skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
}

/// Create a board and its five default columns
///
/// ## Errors
///
/// - `NotFound`: the project does not exist
/// - `InvalidInput`: bad name
pub fn board_create(input: BoardCreate, conn: &mut Connection) -> Result<BoardView> {
    log_op_start!("board_create", project_id = %input.project_id);
    let start = std::time::Instant::now();

    let result = board_create_impl(input, conn).map_err(|e| {
        log_op_error!("board_create", e.clone(), duration_ms = elapsed_ms(start));
        e
    })?;

    log_op_end!(
        "board_create",
        duration_ms = elapsed_ms(start),
        board_id = %result.board.id,
        child_count = result.columns.len()
    );
    Ok(result)
}

fn board_create_impl(input: BoardCreate, conn: &mut Connection) -> Result<BoardView> {
    validate_board_name(&input.name)?;

    let tx = begin_immediate(conn)?;
    require_project(&tx, &input.project_id)?;

    let mut board = Board::new(new_id(), input.project_id, input.name.trim().to_string());
    board.description = input.description;
    SqliteRepo::insert_board(&tx, &board)?;

    for (position, (name, color)) in DEFAULT_COLUMNS.iter().enumerate() {
        let mut column = Column::new(
            new_id(),
            board.id.clone(),
            (*name).to_string(),
            position as u32,
        );
        column.color = (*color).to_string();
        SqliteRepo::insert_column(&tx, &column)?;
    }

    let view = hydration::load_board(&tx, &board.id)?.ok_or_else(|| KanbanError::Internal {
        message: format!("board {} vanished inside its own transaction", board.id),
    })?;

    tx.commit().map_err(from_rusqlite)?;
    Ok(view)
}

/// Hydrated board: columns by position, each with its tasks by position
pub fn board_get(board_id: &str, conn: &Connection) -> Result<BoardView> {
    hydration::load_board(conn, board_id)?.ok_or_else(|| {
        KanbanError::BoardNotFound {
            board_id: board_id.to_string(),
        }
        .into()
    })
}

/// Boards of a project, newest first
pub fn board_list(project_id: &str, conn: &Connection) -> Result<Vec<Board>> {
    require_project(conn, project_id)?;
    SqliteRepo::list_boards(conn, project_id)
}

pub fn board_update(board_id: &str, input: BoardUpdate, conn: &Connection) -> Result<Board> {
    log_op_start!("board_update", board_id = board_id);
    let start = std::time::Instant::now();

    let result = board_update_impl(board_id, input, conn).map_err(|e| {
        log_op_error!(
            "board_update",
            e.clone(),
            duration_ms = elapsed_ms(start),
            board_id = board_id
        );
        e
    })?;

    log_op_end!("board_update", duration_ms = elapsed_ms(start));
    Ok(result)
}

fn board_update_impl(board_id: &str, input: BoardUpdate, conn: &Connection) -> Result<Board> {
    let mut board = require_board(conn, board_id)?;
    if let Some(name) = input.name {
        validate_board_name(&name)?;
        board.name = name.trim().to_string();
    }
    if let Some(description) = input.description {
        board.description = description;
    }
    board.updated_at = chrono::Utc::now();

    SqliteRepo::update_board(conn, &board)?;
    Ok(board)
}

/// Delete a board with its columns and tasks
pub fn board_delete(board_id: &str, conn: &Connection) -> Result<()> {
    log_op_start!("board_delete", board_id = board_id);
    let start = std::time::Instant::now();

    require_board(conn, board_id)
        .and_then(|_| SqliteRepo::delete_board(conn, board_id))
        .map_err(|e| {
            log_op_error!(
                "board_delete",
                e.clone(),
                duration_ms = elapsed_ms(start),
                board_id = board_id
            );
            e
        })?;

    log_op_end!("board_delete", duration_ms = elapsed_ms(start));
    Ok(())
}
