//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating tool calls to the OSRM dispatcher.
//!
//! ## Tool Architecture
//!
//! Tools are defined in `domains/tools/definitions/osrm/` with one file per
//! routing engine service. Each tool defines:
//! - Parameters struct (schema advertised through rmcp)
//! - `request()` (encodes the OSRM path and query)
//! - `create_route()` (wires the tool into the rmcp ToolRouter)
//!
//! Every route shares one [`OsrmDispatcher`], which owns the outbound
//! transport handle.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    handler::server::tool::{ToolCallContext, ToolRouter},
    model::*,
    service::RequestContext,
};
use std::sync::Arc;
use tracing::instrument;

use super::config::Config;
use super::error;
use super::osrm::{HttpOsrmClient, OsrmTransport};
use crate::domains::tools::{OsrmDispatcher, ToolRegistry, build_tool_router};

/// The main MCP server handler.
///
/// This struct implements the `ServerHandler` trait from rmcp; tool calls are
/// routed to the OSRM dispatcher.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Dispatcher shared by all tool routes.
    dispatcher: Arc<OsrmDispatcher>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server talking to the configured routing engine.
    pub fn new(config: Config) -> error::Result<Self> {
        reqwest::Url::parse(&config.osrm.base_url).map_err(|e| {
            error::Error::config(format!(
                "invalid OSRM base URL '{}': {}",
                config.osrm.base_url, e
            ))
        })?;

        let client = HttpOsrmClient::from_config(&config.osrm)?;
        Ok(Self::with_transport(config, Arc::new(client)))
    }

    /// Create a server on top of an explicit routing engine transport.
    pub fn with_transport(config: Config, transport: Arc<dyn OsrmTransport>) -> Self {
        let dispatcher = Arc::new(OsrmDispatcher::new(transport));

        Self {
            tool_router: build_tool_router::<Self>(dispatcher.clone()),
            config: Arc::new(config),
            dispatcher,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Instructions sent to clients on initialization.
    pub fn instructions(&self) -> String {
        format!(
            "Routing tools backed by an OSRM routing engine at {}. \
             Use `route` for paths between coordinates, `nearest` to snap a point \
             to the road network and `table` for duration/distance matrices. \
             Coordinates are [longitude, latitude] pairs.",
            self.dispatcher.endpoint()
        )
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools (for HTTP transport).
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        ToolRegistry::get_all_tools()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Call a tool by name (for HTTP transport).
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> std::result::Result<serde_json::Value, String> {
        let registry = ToolRegistry::new(self.dispatcher.clone());
        registry.call_tool(name, arguments).await
    }
}

/// ServerHandler implementation.
///
/// Catalog names are routed through rmcp's `ToolRouter`, so their arguments
/// are checked against the advertised schema types. Any other name goes to the
/// dispatcher, which answers with an `Unknown tool: {name}` result.
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(self.instructions()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: self.name().to_string(),
                version: self.version().to_string(),
                ..Implementation::from_build_env()
            },
            ..Default::default()
        }
    }

    #[instrument(skip_all, fields(tool = %request.name))]
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        if self.tool_router.has_route(&request.name) {
            let tcc = ToolCallContext::new(self, request, context);
            return self.tool_router.call(tcc).await;
        }

        let arguments = serde_json::Value::Object(request.arguments.unwrap_or_default());
        self.dispatcher
            .call(&request.name, arguments)
            .await
            .map_err(McpError::from)
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        Ok(ListToolsResult::with_all_items(ToolRegistry::get_all_tools()))
    }
}
