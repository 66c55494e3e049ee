//! Ordered container planning
//!
//! A container is the set of rows sharing one parent key (columns of a
//! board, tasks of a column). Every operation here is pure: it decides which
//! positions change and by how much, and leaves execution to the store so
//! that each plan can be applied inside one transaction.

pub mod container;
pub mod move_plan;
pub mod reorder;

pub use container::{clamp_position, next_position, OrderedTable, ShiftDelta, ShiftRange};
pub use move_plan::{plan_move, MovePlan};
pub use reorder::validate_permutation;
