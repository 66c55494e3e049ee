//! Kanflow CLI
//!
//! Command-line interface for Kanflow boards. Every command prints its result
//! as pretty JSON on stdout.

use clap::{Parser, Subcommand};
use kanflow_core::logging_facility::{self, Profile};
use kanflow_core::ExError;
use kanflow_core_types::RequestContext;
use std::path::PathBuf;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "kanflow")]
#[command(about = "Kanflow - ordered kanban boards on SQLite", long_about = None)]
struct Cli {
    /// SQLite database file (created with its parent directory if missing)
    #[arg(long, global = true, env = "KANFLOW_DB", default_value = ".kanflow/store.db")]
    db: PathBuf,

    /// Logging profile: development or production
    #[arg(long, global = true, env = "KANFLOW_LOG_PROFILE", default_value = "development")]
    log_profile: String,

    /// Trace id of an outer caller, echoed on errors
    #[arg(long, global = true, env = "KANFLOW_TRACE_ID")]
    trace_id: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Project operations
    Project(commands::project::ProjectArgs),
    /// Board operations
    Board(commands::board::BoardArgs),
    /// Column operations
    Column(commands::column::ColumnArgs),
    /// Task operations (create, move, reorder, ...)
    Task(commands::task::TaskArgs),
    /// Apply one engine command given as JSON
    Apply(commands::apply::ApplyArgs),
}

fn main() {
    // A missing .env is fine
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    logging_facility::init(Profile::parse(&cli.log_profile));
    let ctx = RequestContext::for_trace(cli.trace_id.clone());

    let result = commands::open_store(&cli.db).and_then(|mut conn| match cli.command {
        Commands::Project(args) => commands::project::execute(args, &mut conn),
        Commands::Board(args) => commands::board::execute(args, &mut conn),
        Commands::Column(args) => commands::column::execute(args, &mut conn),
        Commands::Task(args) => commands::task::execute(args, &mut conn),
        Commands::Apply(args) => commands::apply::execute(args, &mut conn),
    });

    if let Err(e) = result {
        match e.downcast::<ExError>() {
            Ok(err) => eprintln!("Error: {}", err.with_context(&ctx)),
            Err(other) => eprintln!("Error: {}", other),
        }
        std::process::exit(1);
    }
}
