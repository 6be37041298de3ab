//! Nearest tool definition.
//!
//! Snaps a coordinate to the road network via
//! `GET /nearest/v1/{profile}/{lon},{lat}`. No query parameters are sent.

use std::sync::Arc;

use rmcp::{
    handler::server::tool::{ToolRoute, cached_schema_for_type},
    model::Tool,
};
use schemars::JsonSchema;
use serde::Deserialize;

use super::common::{Coordinate, Profile, dispatch_route};
use crate::core::osrm::OsrmRequest;
use crate::domains::tools::dispatcher::{OsrmDispatcher, OsrmOperation};

/// Parameters for the nearest tool.
#[derive(Debug, Clone, PartialEq, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct NearestParams {
    #[schemars(description = "Longitude of the point")]
    pub longitude: f64,

    #[schemars(description = "Latitude of the point")]
    pub latitude: f64,

    #[serde(default)]
    #[schemars(description = "Routing profile to use")]
    pub profile: Profile,
}

impl NearestParams {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.longitude, self.latitude)
    }
}

/// Nearest tool - closest point on the road network.
pub struct NearestTool;

impl NearestTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "nearest";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Find the nearest point on the road network to a given coordinate";

    /// Encode the parameters as a routing engine request.
    pub fn request(params: &NearestParams) -> OsrmRequest {
        OsrmRequest::new(format!(
            "/nearest/v1/{}/{}",
            params.profile,
            params.coordinate()
        ))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<NearestParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for STDIO/TCP transport.
    pub fn create_route<S>(dispatcher: Arc<OsrmDispatcher>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        dispatch_route(Self::to_tool(), dispatcher, OsrmOperation::Nearest)
    }
}
