//! HTTP adapter for the sync gateway port.

mod client;
mod config;
pub mod models;

pub use client::HttpSyncGateway;
pub use config::{API_TIMEOUT_ENV, API_TOKEN_ENV, API_URL_ENV, ConfigError, HttpGatewayConfig};

#[cfg(test)]
pub(crate) use client::rejection;
