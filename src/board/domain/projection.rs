//! Read-only board projection for rendering.

use super::{ColumnId, Priority, Task, TaskStore};
use chrono::{DateTime, Utc};

/// Cards of one column, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnView<'a> {
    id: &'a ColumnId,
    title: &'a str,
    cards: Vec<&'a Task>,
}

impl<'a> ColumnView<'a> {
    /// Returns the column identifier.
    #[must_use]
    pub const fn id(&self) -> &'a ColumnId {
        self.id
    }

    /// Returns the display label.
    #[must_use]
    pub const fn title(&self) -> &'a str {
        self.title
    }

    /// Returns the cards, top to bottom.
    #[must_use]
    pub fn cards(&self) -> &[&'a Task] {
        &self.cards
    }

    /// Returns the number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the column has no cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Counts cards with the given priority.
    #[must_use]
    pub fn count_with_priority(&self, priority: Priority) -> usize {
        self.cards
            .iter()
            .filter(|task| task.priority() == priority)
            .count()
    }

    /// Counts cards past their due date at `now`.
    #[must_use]
    pub fn overdue_count(&self, now: DateTime<Utc>) -> usize {
        self.cards.iter().filter(|task| task.is_overdue(now)).count()
    }
}

/// Board derived from a [`TaskStore`]; recomputed on demand and never
/// mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView<'a> {
    columns: Vec<ColumnView<'a>>,
}

impl<'a> BoardView<'a> {
    /// Projects the store's board into renderable columns.
    #[must_use]
    pub fn project(store: &'a TaskStore) -> Self {
        let columns = store
            .board()
            .columns()
            .iter()
            .map(|column| ColumnView {
                id: column.id(),
                title: column.title(),
                cards: column
                    .task_ids()
                    .iter()
                    .filter_map(|id| store.task(id))
                    .collect(),
            })
            .collect();
        Self { columns }
    }

    /// Returns the columns in layout order.
    #[must_use]
    pub fn columns(&self) -> &[ColumnView<'a>] {
        &self.columns
    }

    /// Returns the view of one column.
    #[must_use]
    pub fn column(&self, id: &ColumnId) -> Option<&ColumnView<'a>> {
        self.columns.iter().find(|column| column.id == id)
    }

    /// Returns the number of cards across all columns.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.columns.iter().map(ColumnView::len).sum()
    }
}
