//! Taskforge: kanban task-board core.
//!
//! This crate keeps a project's tasks partitioned into board columns,
//! applies drag-and-drop reorders with optimistic updates, and synchronizes
//! status changes with a task backend, rolling the board back when the
//! backend refuses a change.
//!
//! # Architecture
//!
//! Taskforge follows hexagonal architecture principles:
//!
//! - **Domain**: Tasks, columns, the task store and its board projection
//! - **Ports**: The sync gateway contract for the task backend
//! - **Adapters**: In-memory and REST implementations of the gateway
//! - **Services**: The drag controller and the board session
//!
//! # Modules
//!
//! - [`board`]: Board state, drag-and-drop and backend synchronization

pub mod board;
