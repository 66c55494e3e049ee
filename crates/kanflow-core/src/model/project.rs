use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{KanbanError, Result};

/// Default accent colour for new projects
pub const DEFAULT_PROJECT_COLOR: &str = "#FF6B4A";

/// Lifecycle status of a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    #[default]
    Active,
    Archived,
    Completed,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Active => "active",
            ProjectStatus::Archived => "archived",
            ProjectStatus::Completed => "completed",
        }
    }

    /// # Errors
    ///
    /// Returns `InvalidEnumValue` for anything but active/archived/completed
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "active" => Ok(ProjectStatus::Active),
            "archived" => Ok(ProjectStatus::Archived),
            "completed" => Ok(ProjectStatus::Completed),
            other => Err(KanbanError::InvalidEnumValue {
                field: "project status".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// Project - the top-level grouping of boards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub color: String,
    pub icon: Option<String>,
    pub status: ProjectStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    pub fn new(id: String, name: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            description: None,
            color: DEFAULT_PROJECT_COLOR.to_string(),
            icon: None,
            status: ProjectStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_project_defaults() {
        let project = Project::new("p1".to_string(), "Website".to_string());
        assert_eq!(project.status, ProjectStatus::Active);
        assert_eq!(project.color, DEFAULT_PROJECT_COLOR);
        assert!(project.description.is_none());
    }

    #[test]
    fn test_status_parse_round_trip() {
        for status in [
            ProjectStatus::Active,
            ProjectStatus::Archived,
            ProjectStatus::Completed,
        ] {
            assert_eq!(ProjectStatus::parse(status.as_str()).unwrap(), status);
        }
        assert!(ProjectStatus::parse("paused").is_err());
    }
}
