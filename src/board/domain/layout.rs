//! Column layout of a board.

use super::{BoardError, ColumnId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A column definition: identifier plus display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Column identifier, equal to the status value of its tasks.
    pub id: ColumnId,
    /// Display label.
    pub title: String,
}

impl ColumnSpec {
    /// Creates a column definition.
    #[must_use]
    pub fn new(id: ColumnId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }
}

/// Ordered set of columns a board renders.
///
/// The first column is the fallback for tasks whose status names no column
/// of the layout.
///
/// # Examples
///
/// ```
/// use taskforge::board::domain::{BoardLayout, ColumnId};
///
/// let layout = BoardLayout::default();
/// assert_eq!(layout.fallback().as_str(), "todo");
///
/// let unknown = ColumnId::new("archived").expect("valid column id");
/// assert_eq!(layout.resolve(&unknown).as_str(), "todo");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ColumnSpec>", into = "Vec<ColumnSpec>")]
pub struct BoardLayout {
    columns: Vec<ColumnSpec>,
    fallback: ColumnId,
}

impl BoardLayout {
    /// Creates a layout from column definitions in display order.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::EmptyLayout`] when no columns are given and
    /// [`BoardError::DuplicateColumn`] when an identifier repeats.
    pub fn new(columns: impl IntoIterator<Item = ColumnSpec>) -> Result<Self, BoardError> {
        let specs: Vec<ColumnSpec> = columns.into_iter().collect();
        let mut seen = HashSet::with_capacity(specs.len());
        for spec in &specs {
            if !seen.insert(&spec.id) {
                return Err(BoardError::DuplicateColumn(spec.id.clone()));
            }
        }
        let fallback = specs
            .first()
            .map(|spec| spec.id.clone())
            .ok_or(BoardError::EmptyLayout)?;
        Ok(Self {
            columns: specs,
            fallback,
        })
    }

    /// The four-column layout used by default: to do, in progress, review,
    /// done.
    #[must_use]
    pub fn standard() -> Self {
        let columns = vec![
            ColumnSpec::new(ColumnId::canonical("todo"), "To Do"),
            ColumnSpec::new(ColumnId::canonical("in-progress"), "In Progress"),
            ColumnSpec::new(ColumnId::canonical("review"), "Review"),
            ColumnSpec::new(ColumnId::canonical("done"), "Done"),
        ];
        Self {
            fallback: ColumnId::canonical("todo"),
            columns,
        }
    }

    /// Returns the column definitions in display order.
    #[must_use]
    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    /// Returns the fallback column for unknown statuses.
    #[must_use]
    pub const fn fallback(&self) -> &ColumnId {
        &self.fallback
    }

    /// Returns whether the layout contains the column.
    #[must_use]
    pub fn contains(&self, column: &ColumnId) -> bool {
        self.columns.iter().any(|spec| spec.id == *column)
    }

    /// Maps a status onto a layout column, substituting the fallback for
    /// unknown statuses.
    #[must_use]
    pub fn resolve(&self, status: &ColumnId) -> ColumnId {
        if self.contains(status) {
            status.clone()
        } else {
            self.fallback.clone()
        }
    }
}

impl Default for BoardLayout {
    fn default() -> Self {
        Self::standard()
    }
}

impl TryFrom<Vec<ColumnSpec>> for BoardLayout {
    type Error = BoardError;

    fn try_from(value: Vec<ColumnSpec>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BoardLayout> for Vec<ColumnSpec> {
    fn from(value: BoardLayout) -> Self {
        value.columns
    }
}
