//! Hydration layer - loads read models from SQLite
//!
//! Children always come back in position order.

#![allow(clippy::result_large_err)]

use crate::errors::Result;
use crate::repo::SqliteRepo;
use kanflow_core::model::{BoardView, ColumnView, TaskDetail};
use rusqlite::Connection;

/// Load a board with its columns and their tasks
///
/// Returns `None` when the board does not exist.
pub fn load_board(conn: &Connection, board_id: &str) -> Result<Option<BoardView>> {
    let Some(board) = SqliteRepo::get_board(conn, board_id)? else {
        return Ok(None);
    };

    let columns = SqliteRepo::list_columns(conn, board_id)?
        .into_iter()
        .map(|column| {
            let tasks = SqliteRepo::list_tasks(conn, &column.id)?;
            Ok(ColumnView { column, tasks })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Some(BoardView { board, columns }))
}

/// Load a task with the column and board that contain it
pub fn load_task_detail(conn: &Connection, task_id: &str) -> Result<Option<TaskDetail>> {
    let Some(task) = SqliteRepo::get_task(conn, task_id)? else {
        return Ok(None);
    };
    let Some(column) = SqliteRepo::get_column(conn, &task.column_id)? else {
        return Ok(None);
    };
    let Some(board) = SqliteRepo::get_board(conn, &column.board_id)? else {
        return Ok(None);
    };

    Ok(Some(TaskDetail {
        task,
        column,
        board,
    }))
}
