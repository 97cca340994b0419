//! Error types for board domain validation and task store operations.

use super::{ColumnId, TaskId};
use thiserror::Error;

/// Errors returned by board domain constructors and task store mutations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardError {
    /// An identifier was empty after trimming.
    #[error("identifier must not be empty")]
    EmptyIdentifier,

    /// A column identifier was empty or contained whitespace.
    #[error("invalid column identifier '{0}'")]
    InvalidColumnId(String),

    /// A board layout was built without columns.
    #[error("board layout must contain at least one column")]
    EmptyLayout,

    /// A board layout listed the same column twice.
    #[error("duplicate column '{0}' in board layout")]
    DuplicateColumn(ColumnId),

    /// A task title was empty after trimming.
    #[error("task title must not be empty")]
    EmptyTaskTitle,

    /// A comment body was empty after trimming.
    #[error("comment text must not be empty")]
    EmptyCommentText,

    /// The task is not known to the store.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The task was not at the position the caller expected.
    ///
    /// Signals that the caller's view of the board is stale.
    #[error("expected task {task_id} at {column}[{index}], found {}", describe_slot(.found.as_ref()))]
    PositionMismatch {
        /// Task the caller tried to move.
        task_id: TaskId,
        /// Column the caller named as the source.
        column: ColumnId,
        /// Index the caller named as the source.
        index: usize,
        /// Task actually stored at that position, if any.
        found: Option<TaskId>,
    },

    /// The column is not part of the board layout.
    #[error("unknown column: {0}")]
    UnknownColumn(ColumnId),
}

fn describe_slot(found: Option<&TaskId>) -> String {
    found.map_or_else(|| "an empty slot".to_owned(), |id| format!("task {id}"))
}

/// Error returned while parsing task priorities.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParsePriorityError(pub String);

/// A breach of the board partition invariant.
///
/// Every task in the store must sit in exactly one column, namely the column
/// matching its status, and every id on the board must name a stored task.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PartitionViolation {
    /// The task appears on the board more than once.
    #[error("task {0} appears in more than one board slot")]
    Duplicated(TaskId),

    /// The task is stored but absent from every column.
    #[error("task {0} is not placed in any column")]
    Orphaned(TaskId),

    /// The board references a task the store does not hold.
    #[error("column {column} references unknown task {task_id}")]
    Dangling {
        /// Column holding the reference.
        column: ColumnId,
        /// Referenced task.
        task_id: TaskId,
    },

    /// The task sits in a column other than its status column.
    #[error("task {task_id} has status {status} but sits in column {column}")]
    Misfiled {
        /// Misplaced task.
        task_id: TaskId,
        /// Status recorded on the task.
        status: ColumnId,
        /// Column the task was found in.
        column: ColumnId,
    },
}
