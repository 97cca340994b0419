//! Wire records exchanged with the task REST API.

use crate::board::{
    domain::{
        Assignee, ColumnId, Comment, CommentId, MemberId, Priority, Task, TaskDraft,
        TaskId,
    },
    ports::SyncGatewayError,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Task as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    /// Task identifier.
    pub id: String,
    /// Title.
    pub title: String,
    /// Description; absent means empty.
    #[serde(default)]
    pub description: Option<String>,
    /// Raw status value.
    #[serde(default)]
    pub status: Option<String>,
    /// Raw priority value.
    #[serde(default)]
    pub priority: Option<String>,
    /// Due date.
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    /// Assigned member.
    #[serde(default)]
    pub assignee: Option<AssigneeRecord>,
    /// Comment thread, oldest first.
    #[serde(default)]
    pub comments: Vec<CommentRecord>,
}

/// Status given to records whose status is missing or malformed.
///
/// The task store maps it onto its fallback column like any other status
/// outside its layout.
pub const UNSET_STATUS: &str = "unset";

impl TaskRecord {
    /// Converts the record into a domain task.
    ///
    /// The status is kept as sent so the task store can bucket it against its
    /// own layout. Missing or malformed statuses become [`UNSET_STATUS`] and
    /// unknown priorities [`Priority::Medium`].
    ///
    /// # Errors
    ///
    /// Returns [`SyncGatewayError::Decode`] when an identifier is empty.
    pub fn into_task(self) -> Result<Task, SyncGatewayError> {
        let id = TaskId::new(self.id).map_err(decode_error)?;
        let status = self
            .status
            .and_then(|raw| ColumnId::new(raw).ok())
            .unwrap_or_else(|| ColumnId::canonical(UNSET_STATUS));
        let comments = self
            .comments
            .into_iter()
            .map(CommentRecord::into_comment)
            .collect::<Result<Vec<_>, _>>()?;

        let mut task = Task::new(id, self.title, status)
            .with_description(self.description.unwrap_or_default())
            .with_priority(Priority::parse_or_default(self.priority.as_deref()))
            .with_comments(comments);
        if let Some(due_date) = self.due_date {
            task = task.with_due_date(due_date);
        }
        if let Some(assignee) = self.assignee {
            task = task.with_assignee(assignee.into_assignee()?);
        }
        Ok(task)
    }
}

/// Assigned member as exchanged with the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssigneeRecord {
    /// Member identifier.
    pub id: String,
    /// Display name.
    pub name: String,
}

impl AssigneeRecord {
    fn into_assignee(self) -> Result<Assignee, SyncGatewayError> {
        let id = MemberId::new(self.id).map_err(decode_error)?;
        Ok(Assignee::new(id, self.name))
    }
}

impl From<&Assignee> for AssigneeRecord {
    fn from(value: &Assignee) -> Self {
        Self {
            id: value.id.as_str().to_owned(),
            name: value.name.clone(),
        }
    }
}

/// Comment as exchanged with the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentRecord {
    /// Comment identifier.
    pub id: String,
    /// Author display name.
    pub author: String,
    /// Body text.
    pub text: String,
    /// Creation time.
    pub timestamp: DateTime<Utc>,
}

impl CommentRecord {
    fn into_comment(self) -> Result<Comment, SyncGatewayError> {
        let id = CommentId::new(self.id).map_err(decode_error)?;
        Ok(Comment::from_parts(id, self.author, self.text, self.timestamp))
    }
}

impl From<&Comment> for CommentRecord {
    fn from(value: &Comment) -> Self {
        Self {
            id: value.id().as_str().to_owned(),
            author: value.author().to_owned(),
            text: value.text().to_owned(),
            timestamp: value.created_at(),
        }
    }
}

/// Request body for creating a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraftRecord {
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Initial status; the backend default applies when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Priority.
    pub priority: String,
    /// Due date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    /// Assigned member.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<AssigneeRecord>,
}

impl From<&TaskDraft> for TaskDraftRecord {
    fn from(value: &TaskDraft) -> Self {
        Self {
            title: value.title().to_owned(),
            description: value.description().to_owned(),
            status: value.status().map(|status| status.as_str().to_owned()),
            priority: value.priority().as_str().to_owned(),
            due_date: value.due_date(),
            assignee: value.assignee().map(AssigneeRecord::from),
        }
    }
}

/// Request body for a status change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdateRecord {
    /// New status.
    pub status: String,
}

impl From<&ColumnId> for StatusUpdateRecord {
    fn from(value: &ColumnId) -> Self {
        Self {
            status: value.as_str().to_owned(),
        }
    }
}

fn decode_error(err: impl std::fmt::Display) -> SyncGatewayError {
    SyncGatewayError::Decode(err.to_string())
}
