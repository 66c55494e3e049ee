//! Project command handlers

#![allow(clippy::result_large_err)]

use super::{elapsed_ms, new_id, require_project};
use kanflow_core::model::{Project, ProjectStatus};
use kanflow_core::rules::validation::{validate_color, validate_project_name};
use kanflow_core::{log_op_end, log_op_error, log_op_start};
use kanflow_store::errors::Result;
use kanflow_store::repo::SqliteRepo;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

/// Fields for a new project
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectCreate {
    pub name: String,
    pub description: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
}

/// Partial project update; `None` leaves a field as it is
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectUpdate {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "super::nullable", skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    pub color: Option<String>,
    #[serde(default, deserialize_with = "super::nullable", skip_serializing_if = "Option::is_none")]
    pub icon: Option<Option<String>>,
    pub status: Option<ProjectStatus>,
}

pub fn project_create(input: ProjectCreate, conn: &Connection) -> Result<Project> {
    log_op_start!("project_create", name = %input.name);
    let start = std::time::Instant::now();

    let result = project_create_impl(input, conn).map_err(|e| {
        log_op_error!("project_create", e.clone(), duration_ms = elapsed_ms(start));
        e
    })?;

    log_op_end!(
        "project_create",
        duration_ms = elapsed_ms(start),
        project_id = %result.id
    );
    Ok(result)
}

fn project_create_impl(input: ProjectCreate, conn: &Connection) -> Result<Project> {
    validate_project_name(&input.name)?;
    if let Some(color) = &input.color {
        validate_color(color)?;
    }

    let mut project = Project::new(new_id(), input.name.trim().to_string());
    project.description = input.description;
    project.icon = input.icon;
    if let Some(color) = input.color {
        project.color = color;
    }

    SqliteRepo::insert_project(conn, &project)?;
    Ok(project)
}

/// # Errors
///
/// `NotFound` for an unknown project
pub fn project_get(project_id: &str, conn: &Connection) -> Result<Project> {
    require_project(conn, project_id)
}

/// All projects, newest first
pub fn project_list(conn: &Connection) -> Result<Vec<Project>> {
    SqliteRepo::list_projects(conn)
}

pub fn project_update(project_id: &str, input: ProjectUpdate, conn: &Connection) -> Result<Project> {
    log_op_start!("project_update", project_id = project_id);
    let start = std::time::Instant::now();

    let result = project_update_impl(project_id, input, conn).map_err(|e| {
        log_op_error!(
            "project_update",
            e.clone(),
            duration_ms = elapsed_ms(start),
            project_id = project_id
        );
        e
    })?;

    log_op_end!("project_update", duration_ms = elapsed_ms(start));
    Ok(result)
}

fn project_update_impl(project_id: &str, input: ProjectUpdate, conn: &Connection) -> Result<Project> {
    let mut project = require_project(conn, project_id)?;

    if let Some(name) = input.name {
        validate_project_name(&name)?;
        project.name = name.trim().to_string();
    }
    if let Some(color) = input.color {
        validate_color(&color)?;
        project.color = color;
    }
    if let Some(description) = input.description {
        project.description = description;
    }
    if let Some(icon) = input.icon {
        project.icon = icon;
    }
    if let Some(status) = input.status {
        project.status = status;
    }
    project.updated_at = chrono::Utc::now();

    SqliteRepo::update_project(conn, &project)?;
    Ok(project)
}

/// Delete a project together with its boards, columns and tasks
pub fn project_delete(project_id: &str, conn: &Connection) -> Result<()> {
    log_op_start!("project_delete", project_id = project_id);
    let start = std::time::Instant::now();

    let result = require_project(conn, project_id)
        .and_then(|_| SqliteRepo::delete_project(conn, project_id))
        .map_err(|e| {
            log_op_error!(
                "project_delete",
                e.clone(),
                duration_ms = elapsed_ms(start),
                project_id = project_id
            );
            e
        })?;

    log_op_end!("project_delete", duration_ms = elapsed_ms(start), deleted = result);
    Ok(())
}
