//! Usage: kanflow task <create|get|list|search|update|move|reorder|delete|compact>

use super::{print_json, CliResult};
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use kanflow_core::model::{TaskPriority, TaskType};
use kanflow_core::ordering::OrderedTable;
use kanflow_engine::commands::container::compact_container;
use kanflow_engine::commands::task::{self, TaskCreate, TaskUpdate};
use rusqlite::Connection;

#[derive(Debug, Args)]
pub struct TaskArgs {
    #[command(subcommand)]
    pub command: TaskCommand,
}

/// Descriptive fields shared by create and update
#[derive(Debug, Args)]
pub struct TaskFields {
    #[arg(long)]
    pub description: Option<String>,
    /// low, medium, high or urgent
    #[arg(long)]
    pub priority: Option<String>,
    /// task, bug, feature, improvement or epic
    #[arg(long = "type")]
    pub task_type: Option<String>,
    #[arg(long)]
    pub story_points: Option<u32>,
    /// YYYY-MM-DD
    #[arg(long)]
    pub due_date: Option<NaiveDate>,
    /// Repeatable
    #[arg(long = "tag")]
    pub tags: Vec<String>,
    #[arg(long)]
    pub assignee: Option<String>,
}

impl TaskFields {
    fn priority(&self) -> kanflow_core::Result<Option<TaskPriority>> {
        self.priority.as_deref().map(TaskPriority::parse).transpose()
    }

    fn task_type(&self) -> kanflow_core::Result<Option<TaskType>> {
        self.task_type.as_deref().map(TaskType::parse).transpose()
    }
}

#[derive(Debug, Subcommand)]
pub enum TaskCommand {
    /// Create a task (appended unless --position is given)
    Create {
        column_id: String,
        title: String,
        #[command(flatten)]
        fields: TaskFields,
        #[arg(long)]
        position: Option<u32>,
    },
    /// Show a task with its column and board
    Get { task_id: String },
    /// List the tasks of a column in order
    List { column_id: String },
    /// Search title, description and assignee
    Search { query: String },
    /// Update a task; --column relocates it to the end of that column
    Update {
        task_id: String,
        #[arg(long)]
        title: Option<String>,
        #[command(flatten)]
        fields: TaskFields,
        #[arg(long)]
        column: Option<String>,
        /// Remove the assignee
        #[arg(long, conflicts_with = "assignee")]
        unassign: bool,
    },
    /// Move a task to a slot in the same or another column
    Move {
        task_id: String,
        target_column_id: String,
        position: u32,
    },
    /// Set the full task order of a column
    Reorder {
        column_id: String,
        /// Every task id of the column, in the new order
        #[arg(required = true, num_args = 1..)]
        task_ids: Vec<String>,
    },
    /// Delete a task
    Delete { task_id: String },
    /// Rewrite a column's task positions to 0..n-1
    Compact { column_id: String },
}

pub fn execute(args: TaskArgs, conn: &mut Connection) -> CliResult {
    match args.command {
        TaskCommand::Create {
            column_id,
            title,
            fields,
            position,
        } => {
            let input = TaskCreate {
                column_id,
                title,
                priority: fields.priority()?,
                task_type: fields.task_type()?,
                description: fields.description,
                story_points: fields.story_points,
                due_date: fields.due_date,
                tags: fields.tags,
                assignee: fields.assignee,
                position,
            };
            print_json(&task::task_create(input, conn)?)
        }
        TaskCommand::Get { task_id } => print_json(&task::task_get(&task_id, conn)?),
        TaskCommand::List { column_id } => print_json(&task::task_list(&column_id, conn)?),
        TaskCommand::Search { query } => print_json(&task::task_search(&query, conn)?),
        TaskCommand::Update {
            task_id,
            title,
            fields,
            column,
            unassign,
        } => {
            let assignee = if unassign {
                Some(None)
            } else {
                fields.assignee.clone().map(Some)
            };
            let input = TaskUpdate {
                title,
                priority: fields.priority()?,
                task_type: fields.task_type()?,
                description: fields.description.map(Some),
                story_points: fields.story_points.map(Some),
                due_date: fields.due_date.map(Some),
                tags: (!fields.tags.is_empty()).then_some(fields.tags),
                assignee,
                column_id: column,
            };
            print_json(&task::task_update(&task_id, input, conn)?)
        }
        TaskCommand::Move {
            task_id,
            target_column_id,
            position,
        } => print_json(&task::task_move(&task_id, &target_column_id, position, conn)?),
        TaskCommand::Reorder {
            column_id,
            task_ids,
        } => print_json(&task::task_reorder(&column_id, &task_ids, conn)?),
        TaskCommand::Delete { task_id } => {
            task::task_delete(&task_id, conn)?;
            print_json(&serde_json::json!({ "deleted": task_id }))
        }
        TaskCommand::Compact { column_id } => {
            let shifted = compact_container(OrderedTable::Tasks, &column_id, conn)?;
            print_json(&serde_json::json!({ "column_id": column_id, "shifted_rows": shifted }))
        }
    }
}
