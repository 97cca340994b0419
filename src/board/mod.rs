//! Kanban board state and synchronization.
//!
//! A project's tasks live in a single [`domain::TaskStore`] that owns the
//! column placement of every task. Drag-and-drop gestures are applied
//! optimistically by [`services::DragReorderController`] and rolled back when
//! the backend refuses the resulting status change. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
