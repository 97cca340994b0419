//! Application services for board interaction and synchronization.

mod drag;
mod session;

pub use drag::{
    DragError, DragGesture, DragReorderController, DragState, DropOutcome, DropTarget, SyncTicket,
};
pub use session::{BoardSession, BoardSessionError, BoardSessionResult};
