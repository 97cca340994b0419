//! Port contracts for board synchronization.
//!
//! Ports define infrastructure-agnostic interfaces used by board services.

pub mod gateway;

#[cfg(test)]
pub use gateway::MockSyncGateway;
pub use gateway::{SyncGateway, SyncGatewayError, SyncGatewayResult};
