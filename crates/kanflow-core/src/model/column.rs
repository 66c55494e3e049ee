use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default colour for columns created without one
pub const DEFAULT_COLUMN_COLOR: &str = "#6B7280";

/// Column - an ordered child of a board and the container of tasks
///
/// `position` is dense within the owning board. `task_limit`, when set, is
/// the WIP cap enforced by admission control on cross-column insertions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub id: String,
    pub board_id: String,
    pub name: String,
    pub color: String,
    pub position: u32,
    pub task_limit: Option<u32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Column {
    pub fn new(id: String, board_id: String, name: String, position: u32) -> Self {
        let now = Utc::now();
        Self {
            id,
            board_id,
            name,
            color: DEFAULT_COLUMN_COLOR.to_string(),
            position,
            task_limit: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the column carries a WIP limit at all
    pub fn is_bounded(&self) -> bool {
        self.task_limit.is_some()
    }
}
