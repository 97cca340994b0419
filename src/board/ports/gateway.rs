//! Sync gateway port: the boundary to the backend that persists tasks.

use crate::board::domain::{ColumnId, Comment, ProjectId, Task, TaskDraft, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for sync gateway operations.
pub type SyncGatewayResult<T> = Result<T, SyncGatewayError>;

/// Backend persistence contract for a project's tasks.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SyncGateway: Send + Sync {
    /// Returns every task belonging to the project.
    async fn fetch_tasks(&self, project_id: &ProjectId) -> SyncGatewayResult<Vec<Task>>;

    /// Persists a task's status change.
    ///
    /// # Errors
    ///
    /// Any failure, including an unreachable backend or a rejected request,
    /// is reported as a [`SyncGatewayError`].
    async fn update_task_status(
        &self,
        task_id: &TaskId,
        status: &ColumnId,
    ) -> SyncGatewayResult<()>;

    /// Creates a task and returns the stored record with its assigned id.
    async fn create_task(
        &self,
        project_id: &ProjectId,
        draft: &TaskDraft,
    ) -> SyncGatewayResult<Task>;

    /// Deletes a task. Deleting an absent task succeeds.
    async fn delete_task(&self, task_id: &TaskId) -> SyncGatewayResult<()>;

    /// Appends a comment to a task.
    async fn add_comment(&self, task_id: &TaskId, comment: &Comment) -> SyncGatewayResult<()>;
}

/// Errors returned by sync gateway implementations.
#[derive(Debug, Clone, Error)]
pub enum SyncGatewayError {
    /// The backend could not be reached.
    #[error("backend unavailable: {0}")]
    Unavailable(String),

    /// The backend answered with a non-success status.
    #[error("backend rejected request with status {status}: {message}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Response body or reason.
        message: String,
    },

    /// The backend does not know the task.
    #[error("task not found on backend: {0}")]
    NotFound(TaskId),

    /// The backend response could not be decoded.
    #[error("failed to decode backend response: {0}")]
    Decode(String),

    /// Transport-layer failure.
    #[error("transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl SyncGatewayError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
