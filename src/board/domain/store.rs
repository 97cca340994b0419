//! Single-owner store of a project's tasks and their column placement.

use super::{
    Board, BoardError, BoardLayout, BoardView, ColumnId, Comment, PartitionViolation, Task, TaskId,
};
use std::collections::{HashMap, HashSet};
use tokio::sync::watch;
use tracing::debug;

/// Authoritative task collection and board for one project.
///
/// The store is the only writer of task status and column order. Every
/// mutation keeps the partition invariant: each stored task sits in exactly
/// one column, the column matching its status, and every id on the board
/// names a stored task. Observers registered through
/// [`TaskStore::subscribe`] receive the board after each mutation.
#[derive(Debug)]
pub struct TaskStore {
    layout: BoardLayout,
    tasks: HashMap<TaskId, Task>,
    board: Board,
    changes: watch::Sender<Board>,
}

/// Captured store state used to roll back optimistic updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSnapshot {
    tasks: HashMap<TaskId, Task>,
    board: Board,
}

impl StoreSnapshot {
    /// Returns the board as it was when the snapshot was taken.
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }
}

impl TaskStore {
    /// Creates an empty store for the given layout.
    #[must_use]
    pub fn new(layout: BoardLayout) -> Self {
        let board = Board::empty(&layout);
        let (changes, _) = watch::channel(board.clone());
        Self {
            layout,
            tasks: HashMap::new(),
            board,
            changes,
        }
    }

    /// Returns the column layout.
    #[must_use]
    pub const fn layout(&self) -> &BoardLayout {
        &self.layout
    }

    /// Returns the current board.
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the task with the given id.
    #[must_use]
    pub fn task(&self, task_id: &TaskId) -> Option<&Task> {
        self.tasks.get(task_id)
    }

    /// Iterates tasks in board order, column by column, top to bottom.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.board.task_ids().filter_map(|id| self.tasks.get(id))
    }

    /// Returns the number of stored tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns whether the store holds no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Derives the read-only board view used for rendering.
    #[must_use]
    pub fn view(&self) -> BoardView<'_> {
        BoardView::project(self)
    }

    /// Registers an observer that sees the board after every mutation.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Board> {
        self.changes.subscribe()
    }

    /// Replaces all state with `tasks`.
    ///
    /// Tasks are bucketed by status in input order. Unknown statuses are
    /// rewritten to the layout's first column. A repeated id replaces the
    /// earlier record the same way [`TaskStore::upsert`] would.
    pub fn load(&mut self, tasks: impl IntoIterator<Item = Task>) -> &Board {
        self.tasks.clear();
        self.board = Board::empty(&self.layout);
        for task in tasks {
            self.place(task);
        }
        debug!(tasks = self.tasks.len(), "task store loaded");
        self.publish();
        &self.board
    }

    /// Moves a task between positions.
    ///
    /// `to_index` is the task's final index in the destination column and is
    /// clamped to the column length. Moving a task onto its own position is a
    /// successful no-op.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::TaskNotFound`] when the task is not stored,
    /// [`BoardError::UnknownColumn`] when either column is outside the layout
    /// and [`BoardError::PositionMismatch`] when `from_column[from_index]` does
    /// not hold the task. The store is unchanged on error.
    pub fn move_task(
        &mut self,
        task_id: &TaskId,
        from_column: &ColumnId,
        from_index: usize,
        to_column: &ColumnId,
        to_index: usize,
    ) -> Result<&Board, BoardError> {
        if !self.tasks.contains_key(task_id) {
            return Err(BoardError::TaskNotFound(task_id.clone()));
        }
        let source = self
            .board
            .column(from_column)
            .ok_or_else(|| BoardError::UnknownColumn(from_column.clone()))?;
        if !self.layout.contains(to_column) {
            return Err(BoardError::UnknownColumn(to_column.clone()));
        }
        match source.task_at(from_index) {
            Some(found) if found == task_id => {}
            found => {
                return Err(BoardError::PositionMismatch {
                    task_id: task_id.clone(),
                    column: from_column.clone(),
                    index: from_index,
                    found: found.cloned(),
                });
            }
        }
        if from_column == to_column && from_index == to_index {
            return Ok(&self.board);
        }

        self.board.remove_at(from_column, from_index);
        let placed_at = self.board.insert(to_column, to_index, task_id.clone());
        if from_column != to_column {
            if let Some(task) = self.tasks.get_mut(task_id) {
                task.set_status(to_column.clone());
            }
        }
        debug!(
            task_id = %task_id,
            from = %from_column,
            from_index,
            to = %to_column,
            to_index = ?placed_at,
            "task moved"
        );
        self.publish();
        Ok(&self.board)
    }

    /// Relocates a task to the end of the `status` column.
    ///
    /// Unknown statuses resolve to the layout's first column. Absent tasks
    /// and unchanged statuses leave the store untouched.
    pub fn set_task_status(&mut self, task_id: &TaskId, status: &ColumnId) -> &Board {
        let target = self.layout.resolve(status);
        let Some(task) = self.tasks.get_mut(task_id) else {
            debug!(task_id = %task_id, "status change for unknown task ignored");
            return &self.board;
        };
        if *task.status() == target {
            return &self.board;
        }
        task.set_status(target.clone());
        self.board.detach(task_id);
        self.board.append(&target, task_id.clone());
        debug!(task_id = %task_id, status = %target, "task status changed");
        self.publish();
        &self.board
    }

    /// Removes a task. Removing an absent task is a no-op.
    pub fn remove_task(&mut self, task_id: &TaskId) -> &Board {
        if self.tasks.remove(task_id).is_some() {
            self.board.detach(task_id);
            debug!(task_id = %task_id, "task removed");
            self.publish();
        }
        &self.board
    }

    /// Inserts or replaces a task.
    ///
    /// New tasks are appended to their status column. Known tasks are
    /// replaced in place; a replacement carrying a different status moves to
    /// the end of its new column.
    pub fn upsert(&mut self, task: Task) -> &Board {
        self.place(task);
        self.publish();
        &self.board
    }

    /// Appends a comment to a task's thread.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::TaskNotFound`] when the task is not stored.
    pub fn append_comment(
        &mut self,
        task_id: &TaskId,
        comment: Comment,
    ) -> Result<&Task, BoardError> {
        let task = self
            .tasks
            .get_mut(task_id)
            .ok_or_else(|| BoardError::TaskNotFound(task_id.clone()))?;
        task.push_comment(comment);
        self.changes.send_replace(self.board.clone());
        Ok(task)
    }

    /// Captures the full store state.
    #[must_use]
    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            tasks: self.tasks.clone(),
            board: self.board.clone(),
        }
    }

    /// Restores state captured by [`TaskStore::snapshot`].
    ///
    /// Changes made after the snapshot was taken are discarded.
    pub fn restore(&mut self, snapshot: StoreSnapshot) -> &Board {
        self.tasks = snapshot.tasks;
        self.board = snapshot.board;
        debug!(tasks = self.tasks.len(), "task store restored from snapshot");
        self.publish();
        &self.board
    }

    /// Checks the partition invariant.
    ///
    /// # Errors
    ///
    /// Returns the first [`PartitionViolation`] found.
    pub fn verify_partition(&self) -> Result<(), PartitionViolation> {
        let mut seen = HashSet::with_capacity(self.tasks.len());
        for column in self.board.columns() {
            for task_id in column.task_ids() {
                if !seen.insert(task_id) {
                    return Err(PartitionViolation::Duplicated(task_id.clone()));
                }
                let Some(task) = self.tasks.get(task_id) else {
                    return Err(PartitionViolation::Dangling {
                        column: column.id().clone(),
                        task_id: task_id.clone(),
                    });
                };
                if task.status() != column.id() {
                    return Err(PartitionViolation::Misfiled {
                        task_id: task_id.clone(),
                        status: task.status().clone(),
                        column: column.id().clone(),
                    });
                }
            }
        }
        match self.tasks.keys().find(|id| !seen.contains(id)) {
            Some(orphan) => Err(PartitionViolation::Orphaned(orphan.clone())),
            None => Ok(()),
        }
    }

    fn place(&mut self, mut task: Task) {
        let status = self.layout.resolve(task.status());
        if status != *task.status() {
            debug!(
                task_id = %task.id(),
                status = %task.status(),
                fallback = %status,
                "unknown status mapped to fallback column"
            );
            task.set_status(status);
        }

        let task_id = task.id().clone();
        let current = self.board.locate(&task_id).map(|(column, _)| column.clone());
        match current {
            Some(column) if column == *task.status() => {}
            Some(_) => {
                self.board.detach(&task_id);
                self.board.append(task.status(), task_id.clone());
            }
            None => self.board.append(task.status(), task_id.clone()),
        }
        self.tasks.insert(task_id, task);
    }

    fn publish(&self) {
        self.changes.send_replace(self.board.clone());
    }
}
