//! Tool Registry - the tool catalog and dispatch by name.
//!
//! This module provides:
//! - The list of available tools and their schemas
//! - Name-based dispatch for transports that do not go through rmcp's router

use std::sync::Arc;

use rmcp::model::Tool;

use super::definitions::{NearestTool, RouteTool, TableTool};
use super::dispatcher::{OsrmDispatcher, OsrmOperation};

/// Tool registry - manages all available tools.
pub struct ToolRegistry {
    dispatcher: Arc<OsrmDispatcher>,
}

impl ToolRegistry {
    /// Create a new tool registry.
    pub fn new(dispatcher: Arc<OsrmDispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        OsrmOperation::NAMES.to_vec()
    }

    /// Get all tools as Tool models (metadata).
    ///
    /// This is the single source of truth for all available tools: every
    /// transport answers `tools/list` from it, in this order.
    pub fn get_all_tools() -> Vec<Tool> {
        vec![
            RouteTool::to_tool(),
            NearestTool::to_tool(),
            TableTool::to_tool(),
        ]
    }

    /// Dispatch a tool call by name.
    ///
    /// Returns the MCP `tools/call` result object. `Err` is reserved for
    /// arguments rejected by the catalog; unknown names and upstream failures
    /// come back as error results.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, String> {
        let result = self
            .dispatcher
            .call(name, arguments)
            .await
            .map_err(|e| e.to_string())?;

        Ok(serde_json::json!({
            "content": result.content,
            "isError": result.is_error.unwrap_or(false)
        }))
    }
}
