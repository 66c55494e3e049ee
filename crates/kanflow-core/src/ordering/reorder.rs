use std::collections::HashSet;

use crate::errors::{KanbanError, Result};

/// Check that `ordered` is a permutation of `existing`
///
/// Checks run in a fixed order so the reported error is deterministic:
/// length first, then duplicates, then ids foreign to the container.
///
/// # Errors
///
/// - `ReorderCountMismatch` when the lengths differ
/// - `ReorderDuplicateId` when an id appears twice
/// - `ReorderForeignId` when an id is not a current child
pub fn validate_permutation(parent_id: &str, existing: &[String], ordered: &[String]) -> Result<()> {
    if existing.len() != ordered.len() {
        return Err(KanbanError::ReorderCountMismatch {
            parent_id: parent_id.to_string(),
            expected: existing.len(),
            actual: ordered.len(),
        });
    }

    let mut seen: HashSet<&str> = HashSet::with_capacity(ordered.len());
    for id in ordered {
        if !seen.insert(id.as_str()) {
            return Err(KanbanError::ReorderDuplicateId {
                parent_id: parent_id.to_string(),
                id: id.clone(),
            });
        }
    }

    let children: HashSet<&str> = existing.iter().map(String::as_str).collect();
    if let Some(foreign) = ordered.iter().find(|id| !children.contains(id.as_str())) {
        return Err(KanbanError::ReorderForeignId {
            parent_id: parent_id.to_string(),
            id: foreign.clone(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_accepts_permutation() {
        let existing = ids(&["x", "y", "z"]);
        assert!(validate_permutation("c", &existing, &ids(&["z", "x", "y"])).is_ok());
    }

    #[test]
    fn test_accepts_empty_container() {
        assert!(validate_permutation("c", &[], &[]).is_ok());
    }

    #[test]
    fn test_rejects_missing_child() {
        let existing = ids(&["x", "y", "z"]);
        let err = validate_permutation("c", &existing, &ids(&["x", "y"])).unwrap_err();
        assert_eq!(
            err,
            KanbanError::ReorderCountMismatch {
                parent_id: "c".to_string(),
                expected: 3,
                actual: 2,
            }
        );
    }

    #[test]
    fn test_rejects_duplicate() {
        let existing = ids(&["x", "y", "z"]);
        let err = validate_permutation("c", &existing, &ids(&["x", "x", "y"])).unwrap_err();
        assert!(matches!(err, KanbanError::ReorderDuplicateId { id, .. } if id == "x"));
    }

    #[test]
    fn test_rejects_foreign_id() {
        let existing = ids(&["x", "y", "z"]);
        let err = validate_permutation("c", &existing, &ids(&["x", "y", "w"])).unwrap_err();
        assert!(matches!(err, KanbanError::ReorderForeignId { id, .. } if id == "w"));
    }
}
