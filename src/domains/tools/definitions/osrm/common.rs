//! Common types and helpers shared across the OSRM tools.
//!
//! This module holds the argument types every routing tool uses
//! (coordinates, profile), the encoders for OSRM's path conventions, and the
//! helpers that turn results into MCP tool output.

use std::fmt;
use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute},
    model::{CallToolResult, Content, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::warn;

use crate::domains::tools::ToolError;
use crate::domains::tools::dispatcher::{OsrmDispatcher, OsrmOperation};

/// Minimum number of coordinates accepted by `route` and `table`.
pub const MIN_COORDINATES: usize = 2;

// ============================================================================
// Argument Types
// ============================================================================

/// A `[longitude, latitude]` pair.
///
/// Values are passed through as given; range checking is left to the
/// routing engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Coordinate(
    /// Longitude
    pub f64,
    /// Latitude
    pub f64,
);

impl Coordinate {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self(longitude, latitude)
    }

    pub fn longitude(&self) -> f64 {
        self.0
    }

    pub fn latitude(&self) -> f64 {
        self.1
    }
}

/// Renders as OSRM's `lon,lat`.
impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.0, self.1)
    }
}

/// Travel mode used by the routing engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    #[default]
    Driving,
    Walking,
    Cycling,
}

impl Profile {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Driving => "driving",
            Self::Walking => "walking",
            Self::Cycling => "cycling",
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Encoders
// ============================================================================

/// Join coordinates as `lon,lat;lon,lat;...`, keeping input order.
pub fn encode_coordinates(coordinates: &[Coordinate]) -> String {
    coordinates
        .iter()
        .map(Coordinate::to_string)
        .collect::<Vec<_>>()
        .join(";")
}

/// Join indices as `i1;i2;...`, keeping input order.
pub fn encode_indices(indices: &[usize]) -> String {
    indices
        .iter()
        .map(usize::to_string)
        .collect::<Vec<_>>()
        .join(";")
}

/// Reject coordinate lists shorter than [`MIN_COORDINATES`].
pub fn require_coordinates(tool: &str, coordinates: &[Coordinate]) -> Result<(), ToolError> {
    if coordinates.len() < MIN_COORDINATES {
        return Err(ToolError::invalid_arguments(format!(
            "'{}' needs at least {} coordinates, got {}",
            tool,
            MIN_COORDINATES,
            coordinates.len()
        )));
    }
    Ok(())
}

/// Deserialize tool arguments into their typed parameter struct.
pub fn parse_params<P: DeserializeOwned>(arguments: serde_json::Value) -> Result<P, ToolError> {
    serde_json::from_value(arguments).map_err(|e| ToolError::invalid_arguments(e.to_string()))
}

// ============================================================================
// Results
// ============================================================================

/// Create an error result; the text is prefixed with `Error: `.
pub fn error_result(message: &str) -> CallToolResult {
    warn!("{}", message);
    CallToolResult::error(vec![Content::text(format!("Error: {}", message))])
}

/// Create a success result with text content.
pub fn success_result(content: String) -> CallToolResult {
    CallToolResult::success(vec![Content::text(content)])
}

/// Result for a tool name that is not in the catalog.
pub fn unknown_tool_result(name: &str) -> CallToolResult {
    CallToolResult::error(vec![Content::text(format!("Unknown tool: {}", name))])
}

// ============================================================================
// Routing
// ============================================================================

/// Build the rmcp route for one operation.
///
/// Arguments are parsed into `P`, wrapped into an [`OsrmOperation`] and handed
/// to the dispatcher.
pub fn dispatch_route<S, P>(
    tool: Tool,
    dispatcher: Arc<OsrmDispatcher>,
    wrap: fn(P) -> OsrmOperation,
) -> ToolRoute<S>
where
    S: Send + Sync + 'static,
    P: DeserializeOwned + Send + 'static,
{
    ToolRoute::new_dyn(tool, move |ctx: ToolCallContext<'_, S>| {
        let args = ctx.arguments.clone().unwrap_or_default();
        let dispatcher = dispatcher.clone();
        async move {
            let params: P =
                parse_params(serde_json::Value::Object(args)).map_err(McpError::from)?;
            dispatcher.dispatch(wrap(params)).await.map_err(McpError::from)
        }
        .boxed()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::RawContent;

    fn text_of(result: &CallToolResult) -> &str {
        match &result.content[0].raw {
            RawContent::Text(text) => &text.text,
            _ => panic!("Expected text content"),
        }
    }

    #[test]
    fn test_encode_coordinates_order_and_separators() {
        let coordinates = vec![
            Coordinate::new(13.388860, 52.517037),
            Coordinate::new(13.397634, 52.529407),
            Coordinate::new(13.428555, 52.523219),
            Coordinate::new(13.388860, 52.517037),
        ];
        let encoded = encode_coordinates(&coordinates);
        assert_eq!(encoded.matches(';').count(), coordinates.len() - 1);
        assert_eq!(
            encoded,
            "13.38886,52.517037;13.397634,52.529407;13.428555,52.523219;13.38886,52.517037"
        );
    }

    #[test]
    fn test_encode_coordinates_integers_and_negatives() {
        let coordinates = vec![Coordinate::new(-74.0, 40.5), Coordinate::new(2.0, -33.25)];
        assert_eq!(encode_coordinates(&coordinates), "-74,40.5;2,-33.25");
    }

    #[test]
    fn test_encode_indices() {
        assert_eq!(encode_indices(&[0, 2]), "0;2");
        assert_eq!(encode_indices(&[3]), "3");
        assert_eq!(encode_indices(&[]), "");
    }

    #[test]
    fn test_coordinate_from_json_pair() {
        let c: Coordinate = serde_json::from_str("[13.4, 52.5]").unwrap();
        assert_eq!(c.longitude(), 13.4);
        assert_eq!(c.latitude(), 52.5);

        assert!(serde_json::from_str::<Coordinate>("[13.4]").is_err());
        assert!(serde_json::from_str::<Coordinate>("[13.4, 52.5, 7.0]").is_err());
        assert!(serde_json::from_str::<Coordinate>(r#"["13.4", 52.5]"#).is_err());
    }

    #[test]
    fn test_profile_default_and_names() {
        assert_eq!(Profile::default(), Profile::Driving);
        let p: Profile = serde_json::from_str(r#""cycling""#).unwrap();
        assert_eq!(p.as_str(), "cycling");
        assert!(serde_json::from_str::<Profile>(r#""flying""#).is_err());
    }

    #[test]
    fn test_require_coordinates() {
        assert!(require_coordinates("route", &[Coordinate::new(1.0, 2.0)]).is_err());
        assert!(
            require_coordinates("route", &[Coordinate::new(1.0, 2.0), Coordinate::new(3.0, 4.0)])
                .is_ok()
        );
    }

    #[test]
    fn test_result_shapes() {
        let err = error_result("boom");
        assert_eq!(text_of(&err), "Error: boom");
        assert_eq!(err.is_error, Some(true));

        let unknown = unknown_tool_result("foo");
        assert_eq!(text_of(&unknown), "Unknown tool: foo");

        let ok = success_result("{}".to_string());
        assert_eq!(text_of(&ok), "{}");
        assert!(!ok.is_error.unwrap_or(false));
    }
}
