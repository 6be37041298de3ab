//! Tool-specific error types.

use rmcp::ErrorData as McpError;
use thiserror::Error;

/// Errors raised before a tool call reaches the routing engine.
///
/// Upstream failures are not `ToolError`s: they are reported to the caller
/// as `Error: ...` tool results.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool is not in the catalog.
    #[error("Tool not found: {0}")]
    NotFound(String),

    /// The arguments do not match the tool's schema.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
}

impl ToolError {
    /// Create a new "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }
}

impl From<ToolError> for McpError {
    fn from(err: ToolError) -> Self {
        McpError::invalid_params(err.to_string(), None)
    }
}
