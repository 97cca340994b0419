//! Domain model for the kanban board.
//!
//! Tasks, the column layout, the board itself and the single-owner
//! [`TaskStore`] that keeps them consistent. Nothing here performs I/O.

mod board;
mod error;
mod ids;
mod layout;
mod projection;
mod store;
mod task;

pub use board::{Board, Column};
pub use error::{BoardError, ParsePriorityError, PartitionViolation};
pub use ids::{ColumnId, CommentId, MemberId, ProjectId, TaskId};
pub use layout::{BoardLayout, ColumnSpec};
pub use projection::{BoardView, ColumnView};
pub use store::{StoreSnapshot, TaskStore};
pub use task::{Assignee, Comment, Priority, Task, TaskDraft};
