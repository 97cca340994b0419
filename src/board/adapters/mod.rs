//! Adapter implementations for the board sync gateway port.

pub mod http;
pub mod memory;
