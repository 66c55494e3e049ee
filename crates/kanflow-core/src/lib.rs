//! Kanflow Core - domain kernel for ordered kanban containers
//!
//! This crate holds everything that does not touch storage:
//! - Project, Board, Column and Task models
//! - The error facility (`KanbanError` domain taxonomy, structured `ExError`)
//! - The logging facility (`log_op_*` macros, profiles, test capture)
//! - Ordered container planning: shift ranges, move plans, density checks
//! - Reorder permutation validation
//! - WIP admission control
//! - Field validation rules
//!
//! The store executes the plans computed here; the engine owns transactions.

pub mod admission;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod ordering;
pub mod rules;

// Re-export commonly used types
pub use errors::{ExError, ExErrorKind, KanbanError, Result};
pub use model::{Board, Column, Project, Task};
pub use ordering::{OrderedTable, ShiftDelta, ShiftRange};

#[doc(hidden)]
pub use kanflow_core_types as __core_types;
#[doc(hidden)]
pub use tracing as __tracing;
