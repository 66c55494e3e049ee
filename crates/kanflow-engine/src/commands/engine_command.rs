//! Engine command dispatch
//!
//! Every mutation the engine offers, as data. Front ends build an
//! `EngineCommand` and hand it to [`apply_engine_command`].

#![allow(clippy::result_large_err)]

use crate::commands::board::{self, BoardCreate, BoardUpdate};
use crate::commands::column::{self, ColumnCreate, ColumnUpdate};
use crate::commands::container;
use crate::commands::project::{self, ProjectCreate, ProjectUpdate};
use crate::commands::task::{self, TaskCreate, TaskUpdate};
use kanflow_core::model::{Board, BoardView, Column, Project, Task, TaskDetail};
use kanflow_core::ordering::OrderedTable;
use kanflow_store::errors::Result;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

/// Engine-level commands that mutate persisted state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum EngineCommand {
    ProjectCreate(ProjectCreate),
    ProjectUpdate {
        project_id: String,
        update: ProjectUpdate,
    },
    ProjectDelete {
        project_id: String,
    },
    BoardCreate(BoardCreate),
    BoardUpdate {
        board_id: String,
        update: BoardUpdate,
    },
    BoardDelete {
        board_id: String,
    },
    ColumnCreate(ColumnCreate),
    ColumnUpdate {
        column_id: String,
        update: ColumnUpdate,
    },
    ColumnDelete {
        column_id: String,
    },
    ColumnReorder {
        board_id: String,
        ordered_ids: Vec<String>,
    },
    TaskCreate(TaskCreate),
    TaskUpdate {
        task_id: String,
        update: TaskUpdate,
    },
    TaskDelete {
        task_id: String,
    },
    /// The Move Engine
    TaskMove {
        task_id: String,
        target_column_id: String,
        new_position: u32,
    },
    TaskReorder {
        column_id: String,
        ordered_ids: Vec<String>,
    },
    /// Repair positions of any container
    CompactContainer {
        table: OrderedTable,
        parent_id: String,
    },
}

/// Result of applying an engine command
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EngineCommandResult {
    Project(Project),
    Board(Board),
    BoardView(BoardView),
    Column(Column),
    Columns(Vec<Column>),
    Task(TaskDetail),
    Tasks(Vec<Task>),
    /// Rows whose position changed
    Compacted { shifted_rows: usize },
    Deleted { id: String },
}

/// Apply an engine command
pub fn apply_engine_command(cmd: EngineCommand, conn: &mut Connection) -> Result<EngineCommandResult> {
    match cmd {
        EngineCommand::ProjectCreate(input) => {
            project::project_create(input, conn).map(EngineCommandResult::Project)
        }
        EngineCommand::ProjectUpdate { project_id, update } => {
            project::project_update(&project_id, update, conn).map(EngineCommandResult::Project)
        }
        EngineCommand::ProjectDelete { project_id } => {
            project::project_delete(&project_id, conn)?;
            Ok(EngineCommandResult::Deleted { id: project_id })
        }
        EngineCommand::BoardCreate(input) => {
            board::board_create(input, conn).map(EngineCommandResult::BoardView)
        }
        EngineCommand::BoardUpdate { board_id, update } => {
            board::board_update(&board_id, update, conn).map(EngineCommandResult::Board)
        }
        EngineCommand::BoardDelete { board_id } => {
            board::board_delete(&board_id, conn)?;
            Ok(EngineCommandResult::Deleted { id: board_id })
        }
        EngineCommand::ColumnCreate(input) => {
            column::column_create(input, conn).map(EngineCommandResult::Column)
        }
        EngineCommand::ColumnUpdate { column_id, update } => {
            column::column_update(&column_id, update, conn).map(EngineCommandResult::Column)
        }
        EngineCommand::ColumnDelete { column_id } => {
            column::column_delete(&column_id, conn)?;
            Ok(EngineCommandResult::Deleted { id: column_id })
        }
        EngineCommand::ColumnReorder {
            board_id,
            ordered_ids,
        } => column::column_reorder(&board_id, &ordered_ids, conn).map(EngineCommandResult::Columns),
        EngineCommand::TaskCreate(input) => {
            task::task_create(input, conn).map(EngineCommandResult::Task)
        }
        EngineCommand::TaskUpdate { task_id, update } => {
            task::task_update(&task_id, update, conn).map(EngineCommandResult::Task)
        }
        EngineCommand::TaskDelete { task_id } => {
            task::task_delete(&task_id, conn)?;
            Ok(EngineCommandResult::Deleted { id: task_id })
        }
        EngineCommand::TaskMove {
            task_id,
            target_column_id,
            new_position,
        } => task::task_move(&task_id, &target_column_id, new_position, conn)
            .map(EngineCommandResult::Task),
        EngineCommand::TaskReorder {
            column_id,
            ordered_ids,
        } => task::task_reorder(&column_id, &ordered_ids, conn).map(EngineCommandResult::Tasks),
        EngineCommand::CompactContainer { table, parent_id } => {
            container::compact_container(table, &parent_id, conn)
                .map(|shifted_rows| EngineCommandResult::Compacted { shifted_rows })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_json_shape() {
        let cmd = EngineCommand::TaskMove {
            task_id: "t1".to_string(),
            target_column_id: "c2".to_string(),
            new_position: 0,
        };
        let json = serde_json::to_value(&cmd).unwrap();
        assert_eq!(json["command"], "task_move");
        assert_eq!(json["target_column_id"], "c2");

        let back: EngineCommand = serde_json::from_value(json).unwrap();
        assert_eq!(back, cmd);
    }

    #[test]
    fn test_cleared_limit_survives_round_trip() {
        let cmd = EngineCommand::ColumnUpdate {
            column_id: "c1".to_string(),
            update: ColumnUpdate {
                task_limit: Some(None),
                ..Default::default()
            },
        };
        let json = serde_json::to_value(&cmd).unwrap();
        assert!(json["update"]["task_limit"].is_null());
        assert!(json["update"].get("name").is_none());

        let back: EngineCommand = serde_json::from_value(json).unwrap();
        assert_eq!(back, cmd);
    }

    #[test]
    fn test_absent_and_null_patch_fields_differ() {
        let absent: TaskUpdate = serde_json::from_str(r#"{"title":"Renamed"}"#).unwrap();
        assert_eq!(absent.assignee, None);
        assert_eq!(absent.description, None);

        let cleared: TaskUpdate =
            serde_json::from_str(r#"{"assignee":null,"description":null,"story_points":null}"#)
                .unwrap();
        assert_eq!(cleared.assignee, Some(None));
        assert_eq!(cleared.description, Some(None));
        assert_eq!(cleared.story_points, Some(None));
        assert_eq!(cleared.due_date, None);

        let set: TaskUpdate = serde_json::from_str(r#"{"assignee":"Ana"}"#).unwrap();
        assert_eq!(set.assignee, Some(Some("Ana".to_string())));
    }
}
