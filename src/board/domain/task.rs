//! Task records, drafts, and the values they carry.

use super::{BoardError, ColumnId, CommentId, MemberId, ParsePriorityError, TaskId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Can wait.
    Low,
    /// Normal urgency.
    #[default]
    Medium,
    /// Needs attention first.
    High,
}

impl Priority {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Parses a wire value, falling back to [`Priority::Medium`] when the
    /// value is missing or unrecognised.
    #[must_use]
    pub fn parse_or_default(value: Option<&str>) -> Self {
        value
            .and_then(|raw| Self::try_from(raw).ok())
            .unwrap_or_default()
    }
}

impl TryFrom<&str> for Priority {
    type Error = ParsePriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(ParsePriorityError(value.to_owned())),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Team member a task is assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignee {
    /// Member identifier.
    pub id: MemberId,
    /// Display name shown on the card.
    pub name: String,
}

impl Assignee {
    /// Creates an assignee reference.
    #[must_use]
    pub fn new(id: MemberId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Comment attached to a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    id: CommentId,
    author: String,
    text: String,
    created_at: DateTime<Utc>,
}

impl Comment {
    /// Creates a new comment stamped with the current clock time.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::EmptyCommentText`] when the text is blank.
    pub fn new(
        author: impl Into<String>,
        text: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, BoardError> {
        let body = text.into();
        if body.trim().is_empty() {
            return Err(BoardError::EmptyCommentText);
        }
        Ok(Self {
            id: CommentId::generate(),
            author: author.into(),
            text: body,
            created_at: clock.utc(),
        })
    }

    /// Reconstructs a comment received from the backend.
    #[must_use]
    pub fn from_parts(
        id: CommentId,
        author: impl Into<String>,
        text: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            author: author.into(),
            text: text.into(),
            created_at,
        }
    }

    /// Returns the comment identifier.
    #[must_use]
    pub const fn id(&self) -> &CommentId {
        &self.id
    }

    /// Returns the author's display name.
    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Returns the comment body.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns when the comment was written.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// A task card on the board.
///
/// The status names the column the task renders in. Only the task store
/// changes a stored task's status, so the column partition stays consistent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    description: String,
    status: ColumnId,
    priority: Priority,
    due_date: Option<DateTime<Utc>>,
    assignee: Option<Assignee>,
    comments: Vec<Comment>,
}

impl Task {
    /// Creates a task with the given identity, title and status.
    ///
    /// Records coming from the backend are accepted as-is; use
    /// [`TaskDraft`] to validate user input before creation.
    #[must_use]
    pub fn new(id: TaskId, title: impl Into<String>, status: ColumnId) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            status,
            priority: Priority::default(),
            due_date: None,
            assignee: None,
            comments: Vec::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the assignee.
    #[must_use]
    pub fn with_assignee(mut self, assignee: Assignee) -> Self {
        self.assignee = Some(assignee);
        self
    }

    /// Sets the comment thread, oldest first.
    #[must_use]
    pub fn with_comments(mut self, comments: impl IntoIterator<Item = Comment>) -> Self {
        self.comments = comments.into_iter().collect();
        self
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the status, i.e. the column the task belongs to.
    #[must_use]
    pub const fn status(&self) -> &ColumnId {
        &self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns the assignee; `None` means unassigned.
    #[must_use]
    pub const fn assignee(&self) -> Option<&Assignee> {
        self.assignee.as_ref()
    }

    /// Returns the comments, oldest first.
    #[must_use]
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Returns whether the task is past due at `now`.
    #[must_use]
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.due_date.is_some_and(|due| due < now)
    }

    pub(crate) fn set_status(&mut self, status: ColumnId) {
        self.status = status;
    }

    pub(crate) fn push_comment(&mut self, comment: Comment) {
        self.comments.push(comment);
    }
}

/// Validated input for creating a task through the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDraft {
    title: String,
    description: String,
    status: Option<ColumnId>,
    priority: Priority,
    due_date: Option<DateTime<Utc>>,
    assignee: Option<Assignee>,
}

impl TaskDraft {
    /// Creates a draft with a required title.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::EmptyTaskTitle`] when the title is blank.
    pub fn new(title: impl Into<String>) -> Result<Self, BoardError> {
        let raw = title.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(BoardError::EmptyTaskTitle);
        }
        Ok(Self {
            title: trimmed.to_owned(),
            description: String::new(),
            status: None,
            priority: Priority::default(),
            due_date: None,
            assignee: None,
        })
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the initial status; the board's first column is used otherwise.
    #[must_use]
    pub fn with_status(mut self, status: ColumnId) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the assignee.
    #[must_use]
    pub fn with_assignee(mut self, assignee: Assignee) -> Self {
        self.assignee = Some(assignee);
        self
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the requested status, if any.
    #[must_use]
    pub const fn status(&self) -> Option<&ColumnId> {
        self.status.as_ref()
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns the assignee, if any.
    #[must_use]
    pub const fn assignee(&self) -> Option<&Assignee> {
        self.assignee.as_ref()
    }

    /// Materialises the draft as a task with the given identifier.
    ///
    /// `fallback` is used when the draft carries no status.
    #[must_use]
    pub fn into_task(self, id: TaskId, fallback: &ColumnId) -> Task {
        let status = self.status.unwrap_or_else(|| fallback.clone());
        Task {
            id,
            title: self.title,
            description: self.description,
            status,
            priority: self.priority,
            due_date: self.due_date,
            assignee: self.assignee,
            comments: Vec::new(),
        }
    }
}
