use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{KanbanError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl TaskPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
            TaskPriority::Urgent => "urgent",
        }
    }

    /// # Errors
    ///
    /// Returns `InvalidEnumValue` for an unknown priority name
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "low" => Ok(TaskPriority::Low),
            "medium" => Ok(TaskPriority::Medium),
            "high" => Ok(TaskPriority::High),
            "urgent" => Ok(TaskPriority::Urgent),
            other => Err(KanbanError::InvalidEnumValue {
                field: "priority".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    #[default]
    Task,
    Bug,
    Feature,
    Improvement,
    Epic,
}

impl TaskType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskType::Task => "task",
            TaskType::Bug => "bug",
            TaskType::Feature => "feature",
            TaskType::Improvement => "improvement",
            TaskType::Epic => "epic",
        }
    }

    /// # Errors
    ///
    /// Returns `InvalidEnumValue` for an unknown type name
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "task" => Ok(TaskType::Task),
            "bug" => Ok(TaskType::Bug),
            "feature" => Ok(TaskType::Feature),
            "improvement" => Ok(TaskType::Improvement),
            "epic" => Ok(TaskType::Epic),
            other => Err(KanbanError::InvalidEnumValue {
                field: "task type".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// Task - an ordered child of a column
///
/// `column_id` changes only through a move (or an update that relocates the
/// task); `position` is dense within the owning column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub column_id: String,
    pub title: String,
    pub description: Option<String>,
    pub priority: TaskPriority,
    pub task_type: TaskType,
    pub position: u32,
    pub story_points: Option<u32>,
    pub due_date: Option<NaiveDate>,
    pub tags: Vec<String>,
    pub assignee: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    pub fn new(id: String, column_id: String, title: String, position: u32) -> Self {
        let now = Utc::now();
        Self {
            id,
            column_id,
            title,
            description: None,
            priority: TaskPriority::default(),
            task_type: TaskType::default(),
            position,
            story_points: None,
            due_date: None,
            tags: Vec::new(),
            assignee: None,
            created_at: now,
            updated_at: now,
        }
    }
}
