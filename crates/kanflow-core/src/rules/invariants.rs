//! Structural invariants over persisted positions

use crate::errors::{KanbanError, Result};

/// Check the density invariant for one container
///
/// `positions` are the positions of every child of `parent_id`, in any order.
/// They must be exactly `{0, 1, ..., n-1}`.
///
/// # Errors
///
/// Returns `DensityViolation` naming the first duplicate or gap found in
/// ascending order.
pub fn check_density<I>(parent_id: &str, positions: I) -> Result<()>
where
    I: IntoIterator<Item = u32>,
{
    let mut sorted: Vec<u32> = positions.into_iter().collect();
    sorted.sort_unstable();

    for (expected, &actual) in sorted.iter().enumerate() {
        let expected = expected as u32;
        if actual == expected {
            continue;
        }
        let reason = if actual < expected {
            format!("position {} is used more than once", actual)
        } else {
            format!("position {} is missing (next is {})", expected, actual)
        };
        return Err(KanbanError::DensityViolation {
            parent_id: parent_id.to_string(),
            reason,
        });
    }

    Ok(())
}
