//! Subcommand implementations

pub mod apply;
pub mod board;
pub mod column;
pub mod project;
pub mod task;

use rusqlite::Connection;
use serde::Serialize;
use std::path::Path;

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Open the database and bring its schema up to date
pub fn open_store(path: &Path) -> Result<Connection, Box<dyn std::error::Error>> {
    let mut conn = kanflow_store::db::open(path)?;
    kanflow_store::migrations::apply_migrations(&mut conn)?;
    Ok(conn)
}

pub fn print_json<T: Serialize>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
