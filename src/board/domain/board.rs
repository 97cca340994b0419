//! Board columns and their ordered task ids.

use super::{BoardLayout, ColumnId, TaskId};
use serde::{Deserialize, Serialize};

/// A board column: the ordered ids of the tasks in one status.
///
/// Order is meaningful; index zero is the top of the column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    id: ColumnId,
    title: String,
    task_ids: Vec<TaskId>,
}

impl Column {
    fn empty(id: ColumnId, title: String) -> Self {
        Self {
            id,
            title,
            task_ids: Vec::new(),
        }
    }

    /// Returns the column identifier.
    #[must_use]
    pub const fn id(&self) -> &ColumnId {
        &self.id
    }

    /// Returns the display label.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the task ids, top to bottom.
    #[must_use]
    pub fn task_ids(&self) -> &[TaskId] {
        &self.task_ids
    }

    /// Returns the number of tasks in the column.
    #[must_use]
    pub fn len(&self) -> usize {
        self.task_ids.len()
    }

    /// Returns whether the column holds no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.task_ids.is_empty()
    }

    /// Returns the id at `index`, if any.
    #[must_use]
    pub fn task_at(&self, index: usize) -> Option<&TaskId> {
        self.task_ids.get(index)
    }

    /// Returns the index of `task_id` in this column, if present.
    #[must_use]
    pub fn position_of(&self, task_id: &TaskId) -> Option<usize> {
        self.task_ids.iter().position(|id| id == task_id)
    }

    fn remove_at(&mut self, index: usize) -> Option<TaskId> {
        (index < self.task_ids.len()).then(|| self.task_ids.remove(index))
    }

    /// Inserts at `index` clamped to `[0, len]` and returns the final index.
    fn insert_clamped(&mut self, index: usize, task_id: TaskId) -> usize {
        let at = index.min(self.task_ids.len());
        self.task_ids.insert(at, task_id);
        at
    }
}

/// The board: one [`Column`] per layout column, in layout order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    columns: Vec<Column>,
}

impl Board {
    /// Creates a board with an empty column for every layout column.
    #[must_use]
    pub fn empty(layout: &BoardLayout) -> Self {
        let columns = layout
            .columns()
            .iter()
            .map(|spec| Column::empty(spec.id.clone(), spec.title.clone()))
            .collect();
        Self { columns }
    }

    /// Returns the columns in layout order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Returns the column with the given identifier.
    #[must_use]
    pub fn column(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.iter().find(|column| column.id == *id)
    }

    /// Returns the column and index currently holding `task_id`.
    #[must_use]
    pub fn locate(&self, task_id: &TaskId) -> Option<(&ColumnId, usize)> {
        self.columns.iter().find_map(|column| {
            column
                .position_of(task_id)
                .map(|index| (&column.id, index))
        })
    }

    /// Iterates every task id on the board, column by column.
    pub fn task_ids(&self) -> impl Iterator<Item = &TaskId> {
        self.columns.iter().flat_map(|column| column.task_ids.iter())
    }

    /// Returns the number of tasks on the board.
    #[must_use]
    pub fn task_count(&self) -> usize {
        self.columns.iter().map(Column::len).sum()
    }

    fn column_mut(&mut self, id: &ColumnId) -> Option<&mut Column> {
        self.columns.iter_mut().find(|column| column.id == *id)
    }

    pub(crate) fn append(&mut self, column: &ColumnId, task_id: TaskId) {
        if let Some(target) = self.column_mut(column) {
            target.task_ids.push(task_id);
        }
    }

    pub(crate) fn insert(
        &mut self,
        column: &ColumnId,
        index: usize,
        task_id: TaskId,
    ) -> Option<usize> {
        self.column_mut(column)
            .map(|target| target.insert_clamped(index, task_id))
    }

    pub(crate) fn remove_at(&mut self, column: &ColumnId, index: usize) -> Option<TaskId> {
        self.column_mut(column)
            .and_then(|source| source.remove_at(index))
    }

    /// Removes `task_id` from whichever column holds it.
    pub(crate) fn detach(&mut self, task_id: &TaskId) -> Option<(ColumnId, usize)> {
        self.columns.iter_mut().find_map(|column| {
            let index = column.position_of(task_id)?;
            column.task_ids.remove(index);
            Some((column.id.clone(), index))
        })
    }
}
