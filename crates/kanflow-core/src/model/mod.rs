pub mod board;
pub mod column;
pub mod project;
pub mod task;
pub mod views;

pub use board::Board;
pub use column::Column;
pub use project::{Project, ProjectStatus};
pub use task::{Task, TaskPriority, TaskType};
pub use views::{BoardView, ColumnView, TaskDetail};
