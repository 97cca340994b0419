//! In-memory sync gateway for tests and offline use.

use crate::board::{
    domain::{BoardLayout, ColumnId, Comment, ProjectId, Task, TaskDraft, TaskId},
    ports::{SyncGateway, SyncGatewayError, SyncGatewayResult},
};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// In-memory backend.
///
/// Stores each project's tasks in insertion order and records every status
/// update it accepts. Writes can be made to fail on demand, either one at a
/// time through [`InMemorySyncGateway::fail_next_write`] or wholesale through
/// [`InMemorySyncGateway::set_offline`].
#[derive(Debug, Clone, Default)]
pub struct InMemorySyncGateway {
    state: Arc<RwLock<InMemoryGatewayState>>,
}

#[derive(Debug, Default)]
struct InMemoryGatewayState {
    layout: BoardLayout,
    projects: HashMap<ProjectId, Vec<Task>>,
    status_updates: Vec<(TaskId, ColumnId)>,
    queued_failures: VecDeque<SyncGatewayError>,
    offline: bool,
}

impl InMemoryGatewayState {
    fn task_mut(&mut self, task_id: &TaskId) -> Option<&mut Task> {
        self.projects
            .values_mut()
            .flat_map(|tasks| tasks.iter_mut())
            .find(|task| task.id() == task_id)
    }

    fn check_write(&mut self) -> SyncGatewayResult<()> {
        if self.offline {
            return Err(SyncGatewayError::Unavailable("gateway is offline".to_owned()));
        }
        self.queued_failures.pop_front().map_or(Ok(()), Err)
    }
}

impl InMemorySyncGateway {
    /// Creates an empty gateway using the standard column layout.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty gateway that assigns drafts without a status to the
    /// first column of `layout`.
    #[must_use]
    pub fn with_layout(layout: BoardLayout) -> Self {
        let state = InMemoryGatewayState {
            layout,
            ..InMemoryGatewayState::default()
        };
        Self {
            state: Arc::new(RwLock::new(state)),
        }
    }

    fn read_state(&self) -> SyncGatewayResult<RwLockReadGuard<'_, InMemoryGatewayState>> {
        self.state
            .read()
            .map_err(|err| SyncGatewayError::transport(std::io::Error::other(err.to_string())))
    }

    fn write_state(&self) -> SyncGatewayResult<RwLockWriteGuard<'_, InMemoryGatewayState>> {
        self.state
            .write()
            .map_err(|err| SyncGatewayError::transport(std::io::Error::other(err.to_string())))
    }

    /// Adds tasks to a project, after any it already holds.
    ///
    /// # Errors
    ///
    /// Returns a transport error when lock acquisition fails.
    pub fn seed(
        &self,
        project_id: &ProjectId,
        tasks: impl IntoIterator<Item = Task>,
    ) -> SyncGatewayResult<()> {
        let mut state = self.write_state()?;
        state
            .projects
            .entry(project_id.clone())
            .or_default()
            .extend(tasks);
        Ok(())
    }

    /// Makes the next write operation fail with `error`.
    ///
    /// Queued failures are consumed in order, one per write.
    ///
    /// # Errors
    ///
    /// Returns a transport error when lock acquisition fails.
    pub fn fail_next_write(&self, error: SyncGatewayError) -> SyncGatewayResult<()> {
        self.write_state()?.queued_failures.push_back(error);
        Ok(())
    }

    /// Makes every operation fail with [`SyncGatewayError::Unavailable`]
    /// while `offline` is set.
    ///
    /// # Errors
    ///
    /// Returns a transport error when lock acquisition fails.
    pub fn set_offline(&self, offline: bool) -> SyncGatewayResult<()> {
        self.write_state()?.offline = offline;
        Ok(())
    }

    /// Returns accepted status updates, oldest first.
    ///
    /// # Errors
    ///
    /// Returns a transport error when lock acquisition fails.
    pub fn status_updates(&self) -> SyncGatewayResult<Vec<(TaskId, ColumnId)>> {
        Ok(self.read_state()?.status_updates.clone())
    }

    /// Returns the stored record of a task.
    ///
    /// # Errors
    ///
    /// Returns a transport error when lock acquisition fails.
    pub fn stored_task(&self, task_id: &TaskId) -> SyncGatewayResult<Option<Task>> {
        let state = self.read_state()?;
        Ok(state
            .projects
            .values()
            .flat_map(|tasks| tasks.iter())
            .find(|task| task.id() == task_id)
            .cloned())
    }
}

#[async_trait]
impl SyncGateway for InMemorySyncGateway {
    async fn fetch_tasks(&self, project_id: &ProjectId) -> SyncGatewayResult<Vec<Task>> {
        let state = self.read_state()?;
        if state.offline {
            return Err(SyncGatewayError::Unavailable("gateway is offline".to_owned()));
        }
        Ok(state.projects.get(project_id).cloned().unwrap_or_default())
    }

    async fn update_task_status(
        &self,
        task_id: &TaskId,
        status: &ColumnId,
    ) -> SyncGatewayResult<()> {
        let mut state = self.write_state()?;
        state.check_write()?;
        let task = state
            .task_mut(task_id)
            .ok_or_else(|| SyncGatewayError::NotFound(task_id.clone()))?;
        task.set_status(status.clone());
        state.status_updates.push((task_id.clone(), status.clone()));
        Ok(())
    }

    async fn create_task(
        &self,
        project_id: &ProjectId,
        draft: &TaskDraft,
    ) -> SyncGatewayResult<Task> {
        let mut state = self.write_state()?;
        state.check_write()?;
        let fallback = state.layout.fallback().clone();
        let task = draft.clone().into_task(TaskId::generate(), &fallback);
        state
            .projects
            .entry(project_id.clone())
            .or_default()
            .push(task.clone());
        Ok(task)
    }

    async fn delete_task(&self, task_id: &TaskId) -> SyncGatewayResult<()> {
        let mut state = self.write_state()?;
        state.check_write()?;
        for tasks in state.projects.values_mut() {
            tasks.retain(|task| task.id() != task_id);
        }
        Ok(())
    }

    async fn add_comment(&self, task_id: &TaskId, comment: &Comment) -> SyncGatewayResult<()> {
        let mut state = self.write_state()?;
        state.check_write()?;
        let task = state
            .task_mut(task_id)
            .ok_or_else(|| SyncGatewayError::NotFound(task_id.clone()))?;
        task.push_comment(comment.clone());
        Ok(())
    }
}
