//! Request dispatcher.
//!
//! Turns one tool invocation into exactly one tool result:
//! parse into an [`OsrmOperation`], encode it, issue a single GET through the
//! [`OsrmTransport`] and relay the body as pretty-printed JSON. Upstream
//! failures of any kind become an `Error: ...` result; nothing is retried.

use std::sync::Arc;

use rmcp::model::CallToolResult;
use tracing::{info, instrument, warn};

use super::ToolError;
use super::definitions::osrm::common::{
    error_result, parse_params, success_result, unknown_tool_result,
};
use super::definitions::{
    NearestParams, NearestTool, Profile, RouteParams, RouteTool, TableParams, TableTool,
};
use crate::core::osrm::{OsrmRequest, OsrmTransport, UpstreamResponse};

/// One of the operations in the tool catalog, with its typed arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum OsrmOperation {
    Route(RouteParams),
    Nearest(NearestParams),
    Table(TableParams),
}

impl OsrmOperation {
    /// Names of all operations, in catalog order.
    pub const NAMES: [&'static str; 3] = [RouteTool::NAME, NearestTool::NAME, TableTool::NAME];

    /// Resolve a tool name and its raw arguments.
    ///
    /// Unknown names yield [`ToolError::NotFound`]; arguments that do not
    /// match the tool's schema yield [`ToolError::InvalidArguments`].
    pub fn parse(name: &str, arguments: serde_json::Value) -> Result<Self, ToolError> {
        match name {
            RouteTool::NAME => Ok(Self::Route(parse_params(arguments)?)),
            NearestTool::NAME => Ok(Self::Nearest(parse_params(arguments)?)),
            TableTool::NAME => Ok(Self::Table(parse_params(arguments)?)),
            _ => Err(ToolError::not_found(name)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Route(_) => RouteTool::NAME,
            Self::Nearest(_) => NearestTool::NAME,
            Self::Table(_) => TableTool::NAME,
        }
    }

    pub fn profile(&self) -> Profile {
        match self {
            Self::Route(p) => p.profile,
            Self::Nearest(p) => p.profile,
            Self::Table(p) => p.profile,
        }
    }

    /// Encode the operation as a routing engine request.
    pub fn encode(&self) -> Result<OsrmRequest, ToolError> {
        match self {
            Self::Route(p) => RouteTool::request(p),
            Self::Nearest(p) => Ok(NearestTool::request(p)),
            Self::Table(p) => TableTool::request(p),
        }
    }
}

/// Dispatches operations to the routing engine.
///
/// Holds only the transport handle; there is no per-call state.
#[derive(Clone)]
pub struct OsrmDispatcher {
    transport: Arc<dyn OsrmTransport>,
}

impl OsrmDispatcher {
    /// Create a dispatcher on top of the given transport.
    pub fn new(transport: Arc<dyn OsrmTransport>) -> Self {
        Self { transport }
    }

    /// The routing engine endpoint, for logs and server info.
    pub fn endpoint(&self) -> String {
        self.transport.endpoint()
    }

    /// Run a typed operation.
    ///
    /// Returns `Err` only when the arguments are rejected before any network
    /// call; every upstream outcome is an `Ok` tool result.
    #[instrument(skip_all, fields(tool = operation.name(), profile = %operation.profile()))]
    pub async fn dispatch(&self, operation: OsrmOperation) -> Result<CallToolResult, ToolError> {
        let request = operation.encode()?;
        info!("Calling routing engine: {}", request);

        let outcome = self
            .transport
            .get(&request)
            .await
            .and_then(UpstreamResponse::into_pretty_json);

        Ok(match outcome {
            Ok(json) => success_result(json),
            Err(e) => error_result(&e.to_string()),
        })
    }

    /// Run a tool call given by name, as received from a client.
    ///
    /// Names outside the catalog produce an `Unknown tool: {name}` result
    /// without touching the network.
    pub async fn call(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<CallToolResult, ToolError> {
        match OsrmOperation::parse(name, arguments) {
            Ok(operation) => self.dispatch(operation).await,
            Err(ToolError::NotFound(name)) => {
                warn!("Unknown tool requested: {}", name);
                Ok(unknown_tool_result(&name))
            }
            Err(e) => Err(e),
        }
    }
}
