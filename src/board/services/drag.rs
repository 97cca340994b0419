//! Drag-and-drop reorder controller.
//!
//! A gesture moves through `Idle -> Dragging -> Committing -> Idle`. The
//! move is applied to the [`TaskStore`] as soon as the task is dropped; a
//! cross-column drop then owes the backend a status update, and a failed
//! update rolls the store back to the state captured when the drag began.
//! Only one gesture can be in flight at a time.

use crate::board::{
    domain::{BoardError, ColumnId, StoreSnapshot, TaskId, TaskStore},
    ports::{SyncGateway, SyncGatewayError, SyncGatewayResult},
};
use std::fmt;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Observable controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragState {
    /// No gesture in progress.
    Idle,
    /// A task is being dragged.
    Dragging,
    /// A drop was applied and awaits backend confirmation.
    Committing,
    /// A failed drop is being rolled back.
    Reverting,
}

impl DragState {
    /// Returns the lower-case state name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Dragging => "dragging",
            Self::Committing => "committing",
            Self::Reverting => "reverting",
        }
    }
}

impl fmt::Display for DragState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a drag gesture started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragGesture {
    /// Dragged task.
    pub task_id: TaskId,
    /// Column the task was picked up from.
    pub from_column: ColumnId,
    /// Index the task was picked up from.
    pub from_index: usize,
}

impl DragGesture {
    /// Describes a gesture picking `task_id` up from `from_column[from_index]`.
    #[must_use]
    pub const fn new(task_id: TaskId, from_column: ColumnId, from_index: usize) -> Self {
        Self {
            task_id,
            from_column,
            from_index,
        }
    }
}

/// Where a dragged task was released.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    /// An explicit final position in a column.
    Position {
        /// Destination column.
        column: ColumnId,
        /// Final index, clamped to the column length.
        index: usize,
    },
    /// The bottom of a column.
    ColumnEnd(ColumnId),
    /// On top of another task card.
    ///
    /// The dragged task lands directly before the target: its final index
    /// is the target's index in the destination column once the dragged task
    /// has been taken out.
    OnTask(TaskId),
}

/// Backend status update owed by a committed cross-column drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncTicket {
    gesture: u64,
    task_id: TaskId,
    status: ColumnId,
}

impl SyncTicket {
    /// Returns the gesture sequence number.
    #[must_use]
    pub const fn gesture(&self) -> u64 {
        self.gesture
    }

    /// Returns the moved task.
    #[must_use]
    pub const fn task_id(&self) -> &TaskId {
        &self.task_id
    }

    /// Returns the status to persist.
    #[must_use]
    pub const fn status(&self) -> &ColumnId {
        &self.status
    }
}

/// Result of a drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// The task stayed in its column; nothing needs persisting.
    Reordered,
    /// The task changed column; the ticket must be settled with
    /// [`DragReorderController::finish_sync`].
    PendingSync(SyncTicket),
}

/// Errors surfaced by the drag controller.
#[derive(Debug, Error)]
pub enum DragError {
    /// A gesture began while another was still in flight.
    #[error("drag of task {task_id} rejected while a gesture is {state}")]
    ConcurrentDragRejected {
        /// Task the rejected gesture tried to drag.
        task_id: TaskId,
        /// State of the in-flight gesture.
        state: DragState,
    },

    /// A drop or cancel arrived without a drag in progress.
    #[error("no drag gesture in progress")]
    NotDragging,

    /// A sync result arrived for a gesture that is not in flight.
    #[error("sync result for gesture {0} does not match the in-flight gesture")]
    StaleSyncTicket(u64),

    /// The drop did not match the board; nothing was changed.
    #[error(transparent)]
    Board(#[from] BoardError),

    /// The backend rejected the status change; the board was reverted.
    #[error("failed to persist status {status} for task {task_id}; board reverted")]
    SyncFailed {
        /// Moved task.
        task_id: TaskId,
        /// Status that failed to persist.
        status: ColumnId,
        /// Gateway failure.
        source: SyncGatewayError,
    },
}

#[derive(Debug)]
enum Phase {
    Idle,
    Dragging {
        gesture: DragGesture,
        snapshot: StoreSnapshot,
    },
    Committing {
        ticket: SyncTicket,
        snapshot: StoreSnapshot,
    },
    Reverting,
}

/// Applies drag gestures to a [`TaskStore`] with optimistic update and
/// rollback.
///
/// The controller owns the store. Non-drag mutations go through
/// [`DragReorderController::store_mut`]; note that a rollback restores the
/// whole pre-gesture snapshot and so discards such mutations made while a
/// drop was committing.
#[derive(Debug)]
pub struct DragReorderController {
    store: TaskStore,
    phase: Phase,
    gestures: u64,
}

impl DragReorderController {
    /// Creates an idle controller owning `store`.
    #[must_use]
    pub const fn new(store: TaskStore) -> Self {
        Self {
            store,
            phase: Phase::Idle,
            gestures: 0,
        }
    }

    /// Returns the store.
    #[must_use]
    pub const fn store(&self) -> &TaskStore {
        &self.store
    }

    /// Returns the store for non-drag mutations.
    pub const fn store_mut(&mut self) -> &mut TaskStore {
        &mut self.store
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> DragState {
        match self.phase {
            Phase::Idle => DragState::Idle,
            Phase::Dragging { .. } => DragState::Dragging,
            Phase::Committing { .. } => DragState::Committing,
            Phase::Reverting => DragState::Reverting,
        }
    }

    /// Returns the gesture being dragged, if any.
    #[must_use]
    pub const fn active_gesture(&self) -> Option<&DragGesture> {
        match &self.phase {
            Phase::Dragging { gesture, .. } => Some(gesture),
            _ => None,
        }
    }

    /// Returns the ticket awaiting backend confirmation, if any.
    #[must_use]
    pub const fn pending_sync(&self) -> Option<&SyncTicket> {
        match &self.phase {
            Phase::Committing { ticket, .. } => Some(ticket),
            _ => None,
        }
    }

    /// Starts a gesture and captures the rollback snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`DragError::ConcurrentDragRejected`] when a gesture is
    /// already in flight. The board is not touched.
    pub fn begin_drag(&mut self, gesture: DragGesture) -> Result<(), DragError> {
        let state = self.state();
        if state != DragState::Idle {
            warn!(task_id = %gesture.task_id, %state, "concurrent drag rejected");
            return Err(DragError::ConcurrentDragRejected {
                task_id: gesture.task_id,
                state,
            });
        }
        debug!(
            task_id = %gesture.task_id,
            from = %gesture.from_column,
            from_index = gesture.from_index,
            "drag started"
        );
        self.phase = Phase::Dragging {
            gesture,
            snapshot: self.store.snapshot(),
        };
        Ok(())
    }

    /// Abandons the gesture without mutating the board.
    ///
    /// # Errors
    ///
    /// Returns [`DragError::NotDragging`] when no task is being dragged.
    pub fn cancel_drag(&mut self) -> Result<(), DragError> {
        match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Dragging { gesture, .. } => {
                debug!(task_id = %gesture.task_id, "drag cancelled");
                Ok(())
            }
            other => {
                self.phase = other;
                Err(DragError::NotDragging)
            }
        }
    }

    /// Releases the dragged task over `target` and applies the move.
    ///
    /// Same-column drops finish immediately. Cross-column drops leave the
    /// controller committing until the returned ticket is settled.
    ///
    /// # Errors
    ///
    /// Returns [`DragError::NotDragging`] without a drag in progress, and
    /// [`DragError::Board`] when the gesture no longer matches the board; the
    /// controller is then idle and the board unchanged.
    pub fn drop_on(&mut self, target: &DropTarget) -> Result<DropOutcome, DragError> {
        let (gesture, snapshot) = match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Dragging { gesture, snapshot } => (gesture, snapshot),
            other => {
                self.phase = other;
                return Err(DragError::NotDragging);
            }
        };

        let (to_column, to_index) = self.resolve_target(&gesture, target)?;
        self.store.move_task(
            &gesture.task_id,
            &gesture.from_column,
            gesture.from_index,
            &to_column,
            to_index,
        )?;

        if to_column == gesture.from_column {
            return Ok(DropOutcome::Reordered);
        }

        self.gestures += 1;
        let ticket = SyncTicket {
            gesture: self.gestures,
            task_id: gesture.task_id,
            status: to_column,
        };
        debug!(
            gesture = ticket.gesture,
            task_id = %ticket.task_id,
            status = %ticket.status,
            "drop committed, awaiting sync"
        );
        self.phase = Phase::Committing {
            ticket: ticket.clone(),
            snapshot,
        };
        Ok(DropOutcome::PendingSync(ticket))
    }

    /// Settles a committed drop with the backend's answer.
    ///
    /// On failure the store is restored to the pre-gesture snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`DragError::SyncFailed`] after a rollback and
    /// [`DragError::StaleSyncTicket`] when `ticket` is not the one in flight.
    pub fn finish_sync(
        &mut self,
        ticket: &SyncTicket,
        result: SyncGatewayResult<()>,
    ) -> Result<(), DragError> {
        let snapshot = match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Committing {
                ticket: current,
                snapshot,
            } if current == *ticket => snapshot,
            other => {
                self.phase = other;
                return Err(DragError::StaleSyncTicket(ticket.gesture));
            }
        };

        match result {
            Ok(()) => {
                debug!(gesture = ticket.gesture, task_id = %ticket.task_id, "drop persisted");
                Ok(())
            }
            Err(source) => {
                self.phase = Phase::Reverting;
                self.store.restore(snapshot);
                self.phase = Phase::Idle;
                warn!(
                    gesture = ticket.gesture,
                    task_id = %ticket.task_id,
                    status = %ticket.status,
                    error = %source,
                    "status sync failed, board reverted"
                );
                Err(DragError::SyncFailed {
                    task_id: ticket.task_id.clone(),
                    status: ticket.status.clone(),
                    source,
                })
            }
        }
    }

    /// Drops the dragged task and, for cross-column moves, persists the new
    /// status through `gateway` before returning.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`DragReorderController::drop_on`] and
    /// [`DragReorderController::finish_sync`].
    pub async fn drop_and_sync<G>(
        &mut self,
        target: &DropTarget,
        gateway: &G,
    ) -> Result<DropOutcome, DragError>
    where
        G: SyncGateway + ?Sized,
    {
        let outcome = self.drop_on(target)?;
        if let DropOutcome::PendingSync(ticket) = &outcome {
            let result = gateway
                .update_task_status(ticket.task_id(), ticket.status())
                .await;
            self.finish_sync(ticket, result)?;
            info!(task_id = %ticket.task_id(), status = %ticket.status(), "task moved");
        }
        Ok(outcome)
    }

    fn resolve_target(
        &self,
        gesture: &DragGesture,
        target: &DropTarget,
    ) -> Result<(ColumnId, usize), BoardError> {
        let board = self.store.board();
        match target {
            DropTarget::Position { column, index } => Ok((column.clone(), *index)),
            DropTarget::ColumnEnd(column) => {
                let len = board
                    .column(column)
                    .ok_or_else(|| BoardError::UnknownColumn(column.clone()))?
                    .len();
                let end = if *column == gesture.from_column {
                    len.saturating_sub(1)
                } else {
                    len
                };
                Ok((column.clone(), end))
            }
            DropTarget::OnTask(target_id) if *target_id == gesture.task_id => {
                Ok((gesture.from_column.clone(), gesture.from_index))
            }
            DropTarget::OnTask(target_id) => {
                let (column, index) = board
                    .locate(target_id)
                    .ok_or_else(|| BoardError::TaskNotFound(target_id.clone()))?;
                let before = if *column == gesture.from_column && index > gesture.from_index {
                    index - 1
                } else {
                    index
                };
                Ok((column.clone(), before))
            }
        }
    }
}
