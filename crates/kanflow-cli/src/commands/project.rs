//! Usage: kanflow project <create|list|get|update|delete>

use super::{print_json, CliResult};
use clap::{Args, Subcommand};
use kanflow_core::model::ProjectStatus;
use kanflow_engine::commands::project::{self, ProjectCreate, ProjectUpdate};
use rusqlite::Connection;

#[derive(Debug, Args)]
pub struct ProjectArgs {
    #[command(subcommand)]
    pub command: ProjectCommand,
}

#[derive(Debug, Subcommand)]
pub enum ProjectCommand {
    /// Create a project
    Create {
        name: String,
        #[arg(long)]
        description: Option<String>,
        /// #RRGGBB
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        icon: Option<String>,
    },
    /// List projects, newest first
    List,
    /// Show one project
    Get { project_id: String },
    /// Update a project
    Update {
        project_id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        icon: Option<String>,
        /// active, archived or completed
        #[arg(long)]
        status: Option<String>,
    },
    /// Delete a project with all its boards
    Delete { project_id: String },
}

pub fn execute(args: ProjectArgs, conn: &mut Connection) -> CliResult {
    match args.command {
        ProjectCommand::Create {
            name,
            description,
            color,
            icon,
        } => print_json(&project::project_create(
            ProjectCreate {
                name,
                description,
                color,
                icon,
            },
            conn,
        )?),
        ProjectCommand::List => print_json(&project::project_list(conn)?),
        ProjectCommand::Get { project_id } => print_json(&project::project_get(&project_id, conn)?),
        ProjectCommand::Update {
            project_id,
            name,
            description,
            color,
            icon,
            status,
        } => {
            let status = status.as_deref().map(ProjectStatus::parse).transpose()?;
            print_json(&project::project_update(
                &project_id,
                ProjectUpdate {
                    name,
                    description: description.map(Some),
                    color,
                    icon: icon.map(Some),
                    status,
                },
                conn,
            )?)
        }
        ProjectCommand::Delete { project_id } => {
            project::project_delete(&project_id, conn)?;
            print_json(&serde_json::json!({ "deleted": project_id }))
        }
    }
}
