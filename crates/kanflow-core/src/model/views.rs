//! Hydrated read models returned by the engine

use serde::{Deserialize, Serialize};

use super::{Board, Column, Task};

/// A column together with its tasks in position order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnView {
    #[serde(flatten)]
    pub column: Column,
    pub tasks: Vec<Task>,
}

/// A board with its columns (and their tasks) in position order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardView {
    #[serde(flatten)]
    pub board: Board,
    pub columns: Vec<ColumnView>,
}

impl BoardView {
    pub fn column(&self, column_id: &str) -> Option<&ColumnView> {
        self.columns.iter().find(|c| c.column.id == column_id)
    }
}

/// A task with the column and board it currently lives in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskDetail {
    #[serde(flatten)]
    pub task: Task,
    pub column: Column,
    pub board: Board,
}
