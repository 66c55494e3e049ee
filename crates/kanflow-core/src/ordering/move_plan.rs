//! Shift planning for moving one item to a slot in the same or another container

use serde::{Deserialize, Serialize};

use super::container::{clamp_position, ShiftDelta, ShiftRange};

/// The complete set of position changes for one move
///
/// Executing `shifts` in order and then writing `final_position` (and the new
/// parent when `cross_parent`) onto the moved row restores density in both
/// containers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovePlan {
    pub source_parent: String,
    pub target_parent: String,
    pub old_position: u32,
    pub final_position: u32,
    pub cross_parent: bool,
    pub shifts: Vec<ShiftRange>,
}

impl MovePlan {
    /// Same container, same slot: nothing to write
    pub fn is_noop(&self) -> bool {
        !self.cross_parent && self.final_position == self.old_position
    }
}

/// Plan moving the item at `old_position` in `source_parent` to
/// `requested_position` in `target_parent`.
///
/// `target_count` is the number of children currently under `target_parent`
/// (for a same-container move this includes the item itself).
///
/// The requested slot is clamped: to `[0, target_count - 1]` within one
/// container, to `[0, target_count]` across containers.
pub fn plan_move(
    source_parent: &str,
    old_position: u32,
    target_parent: &str,
    target_count: u32,
    requested_position: u32,
) -> MovePlan {
    let cross_parent = source_parent != target_parent;

    if !cross_parent {
        let max = target_count.saturating_sub(1);
        let new_position = clamp_position(requested_position, max);

        let shifts = if new_position > old_position {
            // Moving towards the end: pull (old, new] back by one
            vec![ShiftRange::between(
                source_parent,
                old_position + 1,
                new_position,
                ShiftDelta::Decrement,
            )]
        } else if new_position < old_position {
            // Moving towards the start: push [new, old) forward by one
            vec![ShiftRange::between(
                source_parent,
                new_position,
                old_position - 1,
                ShiftDelta::Increment,
            )]
        } else {
            Vec::new()
        };

        return MovePlan {
            source_parent: source_parent.to_string(),
            target_parent: target_parent.to_string(),
            old_position,
            final_position: new_position,
            cross_parent,
            shifts,
        };
    }

    let new_position = clamp_position(requested_position, target_count);

    MovePlan {
        source_parent: source_parent.to_string(),
        target_parent: target_parent.to_string(),
        old_position,
        final_position: new_position,
        cross_parent,
        shifts: vec![
            ShiftRange::closing_gap_after(source_parent, old_position),
            ShiftRange::opening_gap_at(target_parent, new_position),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::invariants::check_density;
    use proptest::prelude::*;

    /// (id, parent, position) rows, mutated the way the store would
    type Rows = Vec<(usize, String, u32)>;

    fn apply(rows: &mut Rows, moved: usize, plan: &MovePlan) {
        for shift in &plan.shifts {
            for (id, parent, position) in rows.iter_mut() {
                if *id != moved && shift.contains(parent, *position) {
                    *position = shift.shifted(*position);
                }
            }
        }
        let row = rows
            .iter_mut()
            .find(|(id, _, _)| *id == moved)
            .expect("moved row exists");
        row.1 = plan.target_parent.clone();
        row.2 = plan.final_position;
    }

    fn column(rows: &Rows, parent: &str) -> Vec<usize> {
        let mut items: Vec<_> = rows.iter().filter(|(_, p, _)| p == parent).collect();
        items.sort_by_key(|(_, _, pos)| *pos);
        items.into_iter().map(|(id, _, _)| *id).collect()
    }

    fn positions(rows: &Rows, parent: &str) -> Vec<u32> {
        rows.iter()
            .filter(|(_, p, _)| p == parent)
            .map(|(_, _, pos)| *pos)
            .collect()
    }

    #[test]
    fn test_same_column_move_to_end() {
        // A: [T0, T1, T2, T3]; move T0 to 3 => [T1, T2, T3, T0]
        let mut rows: Rows = (0..4).map(|i| (i, "A".to_string(), i as u32)).collect();
        let plan = plan_move("A", 0, "A", 4, 3);

        assert_eq!(
            plan.shifts,
            vec![ShiftRange::between("A", 1, 3, ShiftDelta::Decrement)]
        );
        apply(&mut rows, 0, &plan);
        assert_eq!(column(&rows, "A"), vec![1, 2, 3, 0]);
    }

    #[test]
    fn test_same_column_move_towards_start() {
        let mut rows: Rows = (0..4).map(|i| (i, "A".to_string(), i as u32)).collect();
        let plan = plan_move("A", 3, "A", 4, 1);

        assert_eq!(
            plan.shifts,
            vec![ShiftRange::between("A", 1, 2, ShiftDelta::Increment)]
        );
        apply(&mut rows, 3, &plan);
        assert_eq!(column(&rows, "A"), vec![0, 3, 1, 2]);
    }

    #[test]
    fn test_same_slot_is_noop() {
        let plan = plan_move("A", 2, "A", 4, 2);
        assert!(plan.is_noop());
        assert!(plan.shifts.is_empty());
    }

    #[test]
    fn test_cross_column_move_into_empty_column() {
        // A: [T0, T1], B: []; move T0 to B@0 => A: [T1], B: [T0]
        let mut rows: Rows = vec![(0, "A".to_string(), 0), (1, "A".to_string(), 1)];
        let plan = plan_move("A", 0, "B", 0, 0);

        assert!(plan.cross_parent);
        apply(&mut rows, 0, &plan);
        assert_eq!(column(&rows, "A"), vec![1]);
        assert_eq!(positions(&rows, "A"), vec![0]);
        assert_eq!(column(&rows, "B"), vec![0]);
    }

    #[test]
    fn test_out_of_range_position_is_clamped() {
        let same = plan_move("A", 0, "A", 3, 10);
        assert_eq!(same.final_position, 2);

        let cross = plan_move("A", 0, "B", 2, 10);
        assert_eq!(cross.final_position, 2);
    }

    #[test]
    fn test_same_column_singleton_stays_at_zero() {
        let plan = plan_move("A", 0, "A", 1, 5);
        assert_eq!(plan.final_position, 0);
        assert!(plan.is_noop());
    }

    proptest! {
        #[test]
        fn prop_move_preserves_density_and_counts(
            a_len in 1u32..8,
            b_len in 0u32..8,
            pick in 0u32..8,
            requested in 0u32..12,
            cross in any::<bool>(),
        ) {
            let mut rows: Rows = Vec::new();
            for i in 0..a_len {
                rows.push((i as usize, "A".to_string(), i));
            }
            for i in 0..b_len {
                rows.push(((100 + i) as usize, "B".to_string(), i));
            }

            let old = pick % a_len;
            let moved = old as usize;
            let (target, target_count) = if cross { ("B", b_len) } else { ("A", a_len) };

            let plan = plan_move("A", old, target, target_count, requested);
            apply(&mut rows, moved, &plan);

            prop_assert!(check_density("A", positions(&rows, "A")).is_ok());
            prop_assert!(check_density("B", positions(&rows, "B")).is_ok());

            let a_after = positions(&rows, "A").len() as u32;
            let b_after = positions(&rows, "B").len() as u32;
            if cross {
                prop_assert_eq!(a_after, a_len - 1);
                prop_assert_eq!(b_after, b_len + 1);
            } else {
                prop_assert_eq!(a_after, a_len);
                prop_assert_eq!(b_after, b_len);
            }

            let landed = rows.iter().find(|(id, _, _)| *id == moved).map(|r| r.2);
            prop_assert_eq!(landed, Some(plan.final_position));
        }
    }
}
