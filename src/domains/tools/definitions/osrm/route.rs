//! Route tool definition.
//!
//! Calculates a route through two or more coordinates via
//! `GET /route/v1/{profile}/{coordinates}`.
//!
//! Optional flags are forwarded only when the caller supplies them; the
//! routing engine applies its own defaults otherwise. `alternatives` and
//! `steps` are sent only when `true`, so an explicit `false` behaves like an
//! absent field. `geometries` and `overview` are sent whenever present, even
//! when the value equals the advertised default.

use std::fmt;
use std::sync::Arc;

use rmcp::{
    handler::server::tool::{ToolRoute, cached_schema_for_type},
    model::Tool,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::common::{Coordinate, Profile, dispatch_route, encode_coordinates, require_coordinates};
use crate::core::osrm::OsrmRequest;
use crate::domains::tools::ToolError;
use crate::domains::tools::dispatcher::{OsrmDispatcher, OsrmOperation};

// ============================================================================
// Tool Parameters
// ============================================================================

/// Format of the returned route geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Geometries {
    Polyline,
    Polyline6,
    Geojson,
}

impl Geometries {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Polyline => "polyline",
            Self::Polyline6 => "polyline6",
            Self::Geojson => "geojson",
        }
    }
}

impl fmt::Display for Geometries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Level of detail of the overview geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Overview {
    Simplified,
    Full,
    /// No overview geometry.
    False,
}

impl Overview {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Simplified => "simplified",
            Self::Full => "full",
            Self::False => "false",
        }
    }
}

impl fmt::Display for Overview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters for the route tool.
#[derive(Debug, Clone, PartialEq, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct RouteParams {
    /// Waypoints, in travel order.
    #[schemars(description = "Array of [longitude, latitude] coordinate pairs")]
    #[schemars(length(min = 2))]
    pub coordinates: Vec<Coordinate>,

    #[serde(default)]
    #[schemars(description = "Routing profile to use")]
    pub profile: Profile,

    #[schemars(description = "Return alternative routes")]
    #[schemars(extend("default" = false))]
    pub alternatives: Option<bool>,

    #[schemars(description = "Return step-by-step instructions")]
    #[schemars(extend("default" = false))]
    pub steps: Option<bool>,

    #[schemars(description = "Format of the returned geometry")]
    #[schemars(extend("default" = "polyline"))]
    pub geometries: Option<Geometries>,

    #[schemars(description = "Add overview geometry")]
    #[schemars(extend("default" = "simplified"))]
    pub overview: Option<Overview>,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Route tool - shortest path through the given waypoints.
pub struct RouteTool;

impl RouteTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "route";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Calculate a route between two or more coordinates using OSRM";

    /// Encode the parameters as a routing engine request.
    pub fn request(params: &RouteParams) -> Result<OsrmRequest, ToolError> {
        require_coordinates(Self::NAME, &params.coordinates)?;

        let mut request = OsrmRequest::new(format!(
            "/route/v1/{}/{}",
            params.profile,
            encode_coordinates(&params.coordinates)
        ));

        if params.alternatives == Some(true) {
            request = request.with_param("alternatives", "true");
        }
        if params.steps == Some(true) {
            request = request.with_param("steps", "true");
        }
        if let Some(geometries) = params.geometries {
            request = request.with_param("geometries", geometries.as_str());
        }
        if let Some(overview) = params.overview {
            request = request.with_param("overview", overview.as_str());
        }

        Ok(request)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<RouteParams>(),
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
        dispatch_route(Self::to_tool(), dispatcher, OsrmOperation::Route)
    }
}

// ============================================================================
// Tests
// ============================================================================
