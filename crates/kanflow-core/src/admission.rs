//! WIP admission control
//!
//! A column with a `task_limit` refuses new tasks arriving from outside once
//! it holds `task_limit` of them. Moves and edits inside the column never
//! change its count and are always admitted.

use crate::errors::{KanbanError, Result};
use crate::model::Column;

/// Whether `column`, currently holding `child_count` tasks, accepts one more
pub fn admits(column: &Column, child_count: u32, is_cross_column_insertion: bool) -> bool {
    if !is_cross_column_insertion {
        return true;
    }
    match column.task_limit {
        None => true,
        Some(limit) => child_count < limit,
    }
}

/// [`admits`], as a `Result` carrying the rejection details
///
/// # Errors
///
/// `WipLimitReached` when the column is full for a cross-column insertion
pub fn check_admission(
    column: &Column,
    child_count: u32,
    is_cross_column_insertion: bool,
) -> Result<()> {
    if admits(column, child_count, is_cross_column_insertion) {
        return Ok(());
    }
    tracing::debug!(
        column_id = %column.id,
        child_count,
        task_limit = ?column.task_limit,
        "Admission denied"
    );
    Err(KanbanError::WipLimitReached {
        column_id: column.id.clone(),
        column_name: column.name.clone(),
        task_limit: column.task_limit.unwrap_or_default(),
        task_count: child_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(limit: Option<u32>) -> Column {
        let mut c = Column::new("c1".to_string(), "b1".to_string(), "Doing".to_string(), 0);
        c.task_limit = limit;
        c
    }

    #[test]
    fn test_unbounded_column_always_admits() {
        assert!(admits(&column(None), 1_000, true));
    }

    #[test]
    fn test_bounded_column_admits_below_limit() {
        assert!(admits(&column(Some(2)), 1, true));
        assert!(!admits(&column(Some(2)), 2, true));
        assert!(!admits(&column(Some(2)), 3, true));
    }

    #[test]
    fn test_same_column_operations_bypass_limit() {
        assert!(admits(&column(Some(1)), 5, false));
    }

    #[test]
    fn test_check_admission_reports_limit() {
        let err = check_admission(&column(Some(1)), 1, true).unwrap_err();
        assert_eq!(
            err,
            KanbanError::WipLimitReached {
                column_id: "c1".to_string(),
                column_name: "Doing".to_string(),
                task_limit: 1,
                task_count: 1,
            }
        );
    }
}
