//! Usage: kanflow apply '<json>' | kanflow apply --file cmd.json
//!
//! The JSON is an engine command tagged by `command`, for example
//! `{"command":"task_move","task_id":"…","target_column_id":"…","new_position":0}`.

use super::{print_json, CliResult};
use clap::Args;
use kanflow_engine::{apply_engine_command, EngineCommand};
use rusqlite::Connection;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// Inline JSON command
    #[arg(required_unless_present = "file", conflicts_with = "file")]
    pub json: Option<String>,

    /// Read the JSON command from a file
    #[arg(long)]
    pub file: Option<PathBuf>,
}

pub fn execute(args: ApplyArgs, conn: &mut Connection) -> CliResult {
    let text = match (args.json, args.file) {
        (Some(json), _) => json,
        (None, Some(path)) => std::fs::read_to_string(path)?,
        (None, None) => return Err("a JSON command or --file is required".into()),
    };

    let command: EngineCommand = serde_json::from_str(&text)?;
    print_json(&apply_engine_command(command, conn)?)
}
