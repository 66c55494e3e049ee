//! Usage: kanflow column <create|get|list|update|delete|reorder|compact>

use super::{print_json, CliResult};
use clap::{Args, Subcommand};
use kanflow_core::ordering::OrderedTable;
use kanflow_engine::commands::column::{self, ColumnCreate, ColumnUpdate};
use kanflow_engine::commands::container::compact_container;
use rusqlite::Connection;

#[derive(Debug, Args)]
pub struct ColumnArgs {
    #[command(subcommand)]
    pub command: ColumnCommand,
}

#[derive(Debug, Subcommand)]
pub enum ColumnCommand {
    /// Add a column to a board (appended unless --position is given)
    Create {
        board_id: String,
        name: String,
        #[arg(long)]
        color: Option<String>,
        /// WIP limit
        #[arg(long)]
        task_limit: Option<u32>,
        #[arg(long)]
        position: Option<u32>,
    },
    /// Show one column
    Get { column_id: String },
    /// List the columns of a board in order
    List { board_id: String },
    /// Update a column
    Update {
        column_id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        color: Option<String>,
        #[arg(long, conflicts_with = "clear_task_limit")]
        task_limit: Option<u32>,
        /// Remove the WIP limit
        #[arg(long)]
        clear_task_limit: bool,
    },
    /// Delete a column with its tasks
    Delete { column_id: String },
    /// Set the full column order of a board
    Reorder {
        board_id: String,
        /// Every column id of the board, in the new order
        #[arg(required = true, num_args = 1..)]
        column_ids: Vec<String>,
    },
    /// Rewrite a board's column positions to 0..n-1
    Compact { board_id: String },
}

pub fn execute(args: ColumnArgs, conn: &mut Connection) -> CliResult {
    match args.command {
        ColumnCommand::Create {
            board_id,
            name,
            color,
            task_limit,
            position,
        } => print_json(&column::column_create(
            ColumnCreate {
                board_id,
                name,
                color,
                task_limit,
                position,
            },
            conn,
        )?),
        ColumnCommand::Get { column_id } => print_json(&column::column_get(&column_id, conn)?),
        ColumnCommand::List { board_id } => print_json(&column::column_list(&board_id, conn)?),
        ColumnCommand::Update {
            column_id,
            name,
            color,
            task_limit,
            clear_task_limit,
        } => {
            let task_limit = if clear_task_limit {
                Some(None)
            } else {
                task_limit.map(Some)
            };
            print_json(&column::column_update(
                &column_id,
                ColumnUpdate {
                    name,
                    color,
                    task_limit,
                },
                conn,
            )?)
        }
        ColumnCommand::Delete { column_id } => {
            column::column_delete(&column_id, conn)?;
            print_json(&serde_json::json!({ "deleted": column_id }))
        }
        ColumnCommand::Reorder {
            board_id,
            column_ids,
        } => print_json(&column::column_reorder(&board_id, &column_ids, conn)?),
        ColumnCommand::Compact { board_id } => {
            let shifted = compact_container(OrderedTable::Columns, &board_id, conn)?;
            print_json(&serde_json::json!({ "board_id": board_id, "shifted_rows": shifted }))
        }
    }
}
