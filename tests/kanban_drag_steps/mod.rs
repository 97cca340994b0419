//! Step definitions for kanban drag-and-drop scenarios.

pub mod given;
pub mod then;
pub mod when;
