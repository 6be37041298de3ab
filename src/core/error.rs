//! Error types and handling for the MCP server.
//!
//! Errors raised while building the server. Per-call failures never reach
//! this type: they become tool results or MCP errors.

use thiserror::Error;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// Error talking to (or setting up access to) the routing engine.
    #[error("Routing engine error: {0}")]
    Osrm(#[from] super::osrm::OsrmError),

    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
