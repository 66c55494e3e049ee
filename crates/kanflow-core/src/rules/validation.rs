//! Field shape validation shared by the create/update commands
//!
//! Lengths are counted in characters, not bytes.

use crate::errors::{KanbanError, Result};

pub const PROJECT_NAME_MAX: usize = 100;
pub const BOARD_NAME_MAX: usize = 100;
pub const COLUMN_NAME_MAX: usize = 50;
pub const TASK_TITLE_MIN: usize = 2;
pub const TASK_TITLE_MAX: usize = 200;
pub const ASSIGNEE_MAX: usize = 100;
pub const STORY_POINTS_MAX: u32 = 100;

fn validate_name(name: &str, max: usize) -> Result<()> {
    let len = name.trim().chars().count();
    if len == 0 {
        return Err(KanbanError::InvalidName {
            reason: "Name cannot be empty or whitespace-only".to_string(),
        });
    }
    if name.chars().count() > max {
        return Err(KanbanError::InvalidName {
            reason: format!("Name must be at most {} characters", max),
        });
    }
    Ok(())
}

/// # Errors
///
/// `InvalidName` if empty or longer than 100 characters
pub fn validate_project_name(name: &str) -> Result<()> {
    validate_name(name, PROJECT_NAME_MAX)
}

/// # Errors
///
/// `InvalidName` if empty or longer than 100 characters
pub fn validate_board_name(name: &str) -> Result<()> {
    validate_name(name, BOARD_NAME_MAX)
}

/// # Errors
///
/// `InvalidName` if empty or longer than 50 characters
pub fn validate_column_name(name: &str) -> Result<()> {
    validate_name(name, COLUMN_NAME_MAX)
}

/// # Errors
///
/// `InvalidTitle` unless the trimmed title has 2..=200 characters
pub fn validate_task_title(title: &str) -> Result<()> {
    let len = title.trim().chars().count();
    if len < TASK_TITLE_MIN {
        return Err(KanbanError::InvalidTitle {
            reason: format!("Title must have at least {} characters", TASK_TITLE_MIN),
        });
    }
    if title.chars().count() > TASK_TITLE_MAX {
        return Err(KanbanError::InvalidTitle {
            reason: format!("Title must be at most {} characters", TASK_TITLE_MAX),
        });
    }
    Ok(())
}

/// Colours are `#RRGGBB` hex
///
/// # Errors
///
/// `InvalidColor` for anything else
pub fn validate_color(color: &str) -> Result<()> {
    let bytes = color.as_bytes();
    let valid = bytes.len() == 7 && bytes[0] == b'#' && bytes[1..].iter().all(u8::is_ascii_hexdigit);
    if valid {
        Ok(())
    } else {
        Err(KanbanError::InvalidColor {
            color: color.to_string(),
        })
    }
}

/// # Errors
///
/// `InvalidTaskLimit` when the limit is zero
pub fn validate_task_limit(limit: u32) -> Result<()> {
    if limit == 0 {
        return Err(KanbanError::InvalidTaskLimit { value: limit });
    }
    Ok(())
}

/// # Errors
///
/// `InvalidStoryPoints` outside 1..=100
pub fn validate_story_points(points: u32) -> Result<()> {
    if points == 0 || points > STORY_POINTS_MAX {
        return Err(KanbanError::InvalidStoryPoints { value: points });
    }
    Ok(())
}

/// # Errors
///
/// `InvalidAssignee` when longer than 100 characters
pub fn validate_assignee(assignee: &str) -> Result<()> {
    if assignee.chars().count() > ASSIGNEE_MAX {
        return Err(KanbanError::InvalidAssignee {
            reason: format!("Assignee must be at most {} characters", ASSIGNEE_MAX),
        });
    }
    Ok(())
}
