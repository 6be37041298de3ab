//! Table tool definition.
//!
//! Computes travel-time/distance matrices via
//! `GET /table/v1/{profile}/{coordinates}`. `sources` and `destinations` are
//! indices into `coordinates`; when omitted the routing engine uses all of
//! them. Index bounds are checked by the routing engine.

use std::sync::Arc;

use rmcp::{
    handler::server::tool::{ToolRoute, cached_schema_for_type},
    model::Tool,
};
use schemars::JsonSchema;
use serde::Deserialize;

use super::common::{
    Coordinate, Profile, dispatch_route, encode_coordinates, encode_indices, require_coordinates,
};
use crate::core::osrm::OsrmRequest;
use crate::domains::tools::ToolError;
use crate::domains::tools::dispatcher::{OsrmDispatcher, OsrmOperation};

/// Parameters for the table tool.
#[derive(Debug, Clone, PartialEq, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct TableParams {
    #[schemars(description = "Array of [longitude, latitude] coordinate pairs")]
    #[schemars(length(min = 2))]
    pub coordinates: Vec<Coordinate>,

    #[serde(default)]
    #[schemars(description = "Routing profile to use")]
    pub profile: Profile,

    #[schemars(description = "Indices of source coordinates (default: all)")]
    pub sources: Option<Vec<usize>>,

    #[schemars(description = "Indices of destination coordinates (default: all)")]
    pub destinations: Option<Vec<usize>>,
}

/// Table tool - duration/distance matrix between coordinates.
pub struct TableTool;

impl TableTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "table";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Calculate travel time and distance between multiple coordinates";

    /// Encode the parameters as a routing engine request.
    pub fn request(params: &TableParams) -> Result<OsrmRequest, ToolError> {
        require_coordinates(Self::NAME, &params.coordinates)?;

        let mut request = OsrmRequest::new(format!(
            "/table/v1/{}/{}",
            params.profile,
            encode_coordinates(&params.coordinates)
        ));

        if let Some(sources) = &params.sources {
            request = request.with_param("sources", encode_indices(sources));
        }
        if let Some(destinations) = &params.destinations {
            request = request.with_param("destinations", encode_indices(destinations));
        }

        Ok(request)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<TableParams>(),
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
        dispatch_route(Self::to_tool(), dispatcher, OsrmOperation::Table)
    }
}
