use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Columns seeded into every new board, in position order (name, colour)
pub const DEFAULT_COLUMNS: [(&str, &str); 5] = [
    ("Backlog", "#6B7280"),
    ("To Do", "#3B82F6"),
    ("In Progress", "#F59E0B"),
    ("In Review", "#8B5CF6"),
    ("Done", "#10B981"),
];

/// Board - owns an ordered set of columns
///
/// Boards themselves are not positioned; they are listed newest first
/// within their project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub id: String,
    pub project_id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Board {
    pub fn new(id: String, project_id: String, name: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            project_id,
            name,
            description: None,
            created_at: now,
            updated_at: now,
        }
    }
}
