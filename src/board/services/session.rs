//! Board session: one project's board wired to its backend.

use super::drag::{
    DragError, DragGesture, DragReorderController, DragState, DropOutcome, DropTarget,
};
use crate::board::{
    domain::{
        Board, BoardError, BoardLayout, BoardView, ColumnId, Comment, ProjectId, Task, TaskDraft,
        TaskId, TaskStore,
    },
    ports::{SyncGateway, SyncGatewayError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{info, warn};

/// Service-level errors for board sessions.
#[derive(Debug, Error)]
pub enum BoardSessionError {
    /// Domain validation or store operation failed.
    #[error(transparent)]
    Domain(#[from] BoardError),
    /// A drag operation failed.
    #[error(transparent)]
    Drag(#[from] DragError),
    /// A backend call failed; local state was not changed.
    #[error(transparent)]
    Gateway(#[from] SyncGatewayError),
    /// A non-drag status change failed to persist and was rolled back.
    #[error("failed to persist status {status} for task {task_id}; change reverted")]
    StatusSyncFailed {
        /// Task whose status was changed.
        task_id: TaskId,
        /// Status that failed to persist.
        status: ColumnId,
        /// Gateway failure.
        source: SyncGatewayError,
    },
    /// The board cannot be reloaded or edited while a drag gesture is in
    /// flight.
    #[error("board update refused while a drag gesture is {0}")]
    GestureInFlight(DragState),
}

/// Result type for board session operations.
pub type BoardSessionResult<T> = Result<T, BoardSessionError>;

/// Orchestrates a project's board: loading, drag-and-drop, status changes,
/// task creation and deletion, and comments.
///
/// Drag and status changes are optimistic and rolled back when the backend
/// refuses them. Creation, deletion and comments reach the store only after
/// the backend has accepted them. Every operation other than the drag itself
/// is refused until the controller is idle again, so a rolled-back drop never
/// discards a change the backend already holds.
pub struct BoardSession<G, C>
where
    G: SyncGateway,
    C: Clock + Send + Sync,
{
    project_id: ProjectId,
    gateway: Arc<G>,
    clock: Arc<C>,
    controller: DragReorderController,
}

impl<G, C> BoardSession<G, C>
where
    G: SyncGateway,
    C: Clock + Send + Sync,
{
    /// Loads a project's tasks and opens its board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardSessionError::Gateway`] when the tasks cannot be
    /// fetched.
    pub async fn open(
        project_id: ProjectId,
        layout: BoardLayout,
        gateway: Arc<G>,
        clock: Arc<C>,
    ) -> BoardSessionResult<Self> {
        let tasks = gateway.fetch_tasks(&project_id).await?;
        let mut store = TaskStore::new(layout);
        store.load(tasks);
        info!(project_id = %project_id, tasks = store.len(), "board opened");
        Ok(Self {
            project_id,
            gateway,
            clock,
            controller: DragReorderController::new(store),
        })
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn project_id(&self) -> &ProjectId {
        &self.project_id
    }

    /// Returns the task store.
    #[must_use]
    pub const fn store(&self) -> &TaskStore {
        self.controller.store()
    }

    /// Returns the current board.
    #[must_use]
    pub const fn board(&self) -> &Board {
        self.controller.store().board()
    }

    /// Derives the renderable board view.
    #[must_use]
    pub fn view(&self) -> BoardView<'_> {
        self.controller.store().view()
    }

    /// Registers an observer that sees the board after every change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Board> {
        self.controller.store().subscribe()
    }

    /// Returns the drag controller state.
    #[must_use]
    pub const fn drag_state(&self) -> DragState {
        self.controller.state()
    }

    /// Reloads the board from the backend.
    ///
    /// # Errors
    ///
    /// Returns [`BoardSessionError::GestureInFlight`] unless the drag
    /// controller is idle, and [`BoardSessionError::Gateway`] when the fetch
    /// fails; the board is unchanged in both cases.
    pub async fn refresh(&mut self) -> BoardSessionResult<&Board> {
        self.ensure_idle()?;
        let tasks = self.gateway.fetch_tasks(&self.project_id).await?;
        let board = self.controller.store_mut().load(tasks);
        info!(
            project_id = %self.project_id,
            tasks = board.task_count(),
            "board refreshed"
        );
        Ok(board)
    }

    /// Starts dragging a task.
    ///
    /// # Errors
    ///
    /// Returns [`DragError::ConcurrentDragRejected`] while another gesture is
    /// in flight.
    pub fn begin_drag(&mut self, gesture: DragGesture) -> BoardSessionResult<()> {
        Ok(self.controller.begin_drag(gesture)?)
    }

    /// Cancels the current drag.
    ///
    /// # Errors
    ///
    /// Returns [`DragError::NotDragging`] when no task is being dragged.
    pub fn cancel_drag(&mut self) -> BoardSessionResult<()> {
        Ok(self.controller.cancel_drag()?)
    }

    /// Drops the dragged task and persists a column change.
    ///
    /// # Errors
    ///
    /// Returns [`DragError`] variants; on [`DragError::SyncFailed`] the
    /// board has been reverted to its pre-drag state.
    pub async fn drop_task(&mut self, target: &DropTarget) -> BoardSessionResult<DropOutcome> {
        Ok(self
            .controller
            .drop_and_sync(target, self.gateway.as_ref())
            .await?)
    }

    /// Moves a task to the end of the `status` column and persists the
    /// change.
    ///
    /// Unknown tasks and unchanged statuses are no-ops.
    ///
    /// # Errors
    ///
    /// Returns [`BoardSessionError::GestureInFlight`] unless the drag
    /// controller is idle, and [`BoardSessionError::StatusSyncFailed`] after
    /// rolling the change back when the backend refuses it.
    pub async fn change_status(
        &mut self,
        task_id: &TaskId,
        status: &ColumnId,
    ) -> BoardSessionResult<&Board> {
        self.ensure_idle()?;
        let store = self.controller.store_mut();
        let target = store.layout().resolve(status);
        let unchanged = store
            .task(task_id)
            .is_none_or(|task| *task.status() == target);
        if unchanged {
            return Ok(self.controller.store().board());
        }

        let snapshot = store.snapshot();
        store.set_task_status(task_id, &target);
        if let Err(source) = self.gateway.update_task_status(task_id, &target).await {
            self.controller.store_mut().restore(snapshot);
            warn!(
                task_id = %task_id,
                status = %target,
                error = %source,
                "status sync failed, change reverted"
            );
            return Err(BoardSessionError::StatusSyncFailed {
                task_id: task_id.clone(),
                status: target,
                source,
            });
        }
        Ok(self.controller.store().board())
    }

    /// Creates a task through the backend and adds it to the board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardSessionError::GestureInFlight`] unless the drag
    /// controller is idle, and [`BoardSessionError::Gateway`] when the
    /// backend refuses the task; the board is unchanged in both cases.
    pub async fn create_task(&mut self, draft: TaskDraft) -> BoardSessionResult<Task> {
        self.ensure_idle()?;
        let created = self.gateway.create_task(&self.project_id, &draft).await?;
        let task_id = created.id().clone();
        let store = self.controller.store_mut();
        store.upsert(created.clone());
        let stored = store.task(&task_id).cloned().unwrap_or(created);
        info!(task_id = %task_id, status = %stored.status(), "task created");
        Ok(stored)
    }

    /// Deletes a task through the backend and removes it from the board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardSessionError::GestureInFlight`] unless the drag
    /// controller is idle, and [`BoardSessionError::Gateway`] when the
    /// backend refuses the deletion; the board is unchanged in both cases.
    pub async fn delete_task(&mut self, task_id: &TaskId) -> BoardSessionResult<()> {
        self.ensure_idle()?;
        self.gateway.delete_task(task_id).await?;
        self.controller.store_mut().remove_task(task_id);
        info!(task_id = %task_id, "task deleted");
        Ok(())
    }

    /// Adds a comment to a task.
    ///
    /// # Errors
    ///
    /// Returns [`BoardSessionError::GestureInFlight`] unless the drag
    /// controller is idle, [`BoardError::TaskNotFound`] for unknown tasks,
    /// [`BoardError::EmptyCommentText`] for blank text, and
    /// [`BoardSessionError::Gateway`] when the backend refuses the comment.
    pub async fn add_comment(
        &mut self,
        task_id: &TaskId,
        author: &str,
        text: &str,
    ) -> BoardSessionResult<Comment> {
        self.ensure_idle()?;
        if self.controller.store().task(task_id).is_none() {
            return Err(BoardError::TaskNotFound(task_id.clone()).into());
        }
        let comment = Comment::new(author, text, &*self.clock)?;
        self.gateway.add_comment(task_id, &comment).await?;
        self.controller
            .store_mut()
            .append_comment(task_id, comment.clone())?;
        Ok(comment)
    }

    const fn ensure_idle(&self) -> BoardSessionResult<()> {
        match self.controller.state() {
            DragState::Idle => Ok(()),
            state => Err(BoardSessionError::GestureInFlight(state)),
        }
    }
}
