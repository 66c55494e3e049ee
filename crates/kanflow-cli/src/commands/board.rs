//! Usage: kanflow board <create|list|get|update|delete>

use super::{print_json, CliResult};
use clap::{Args, Subcommand};
use kanflow_engine::commands::board::{self, BoardCreate, BoardUpdate};
use rusqlite::Connection;

#[derive(Debug, Args)]
pub struct BoardArgs {
    #[command(subcommand)]
    pub command: BoardCommand,
}

#[derive(Debug, Subcommand)]
pub enum BoardCommand {
    /// Create a board with the default columns
    Create {
        project_id: String,
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// List the boards of a project
    List { project_id: String },
    /// Show a board with its columns and tasks
    Get { board_id: String },
    /// Rename or re-describe a board
    Update {
        board_id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a board with its columns and tasks
    Delete { board_id: String },
}

pub fn execute(args: BoardArgs, conn: &mut Connection) -> CliResult {
    match args.command {
        BoardCommand::Create {
            project_id,
            name,
            description,
        } => print_json(&board::board_create(
            BoardCreate {
                project_id,
                name,
                description,
            },
            conn,
        )?),
        BoardCommand::List { project_id } => print_json(&board::board_list(&project_id, conn)?),
        BoardCommand::Get { board_id } => print_json(&board::board_get(&board_id, conn)?),
        BoardCommand::Update {
            board_id,
            name,
            description,
        } => print_json(&board::board_update(
            &board_id,
            BoardUpdate {
                name,
                description: description.map(Some),
            },
            conn,
        )?),
        BoardCommand::Delete { board_id } => {
            board::board_delete(&board_id, conn)?;
            print_json(&serde_json::json!({ "deleted": board_id }))
        }
    }
}
