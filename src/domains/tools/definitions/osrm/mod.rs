//! OSRM tools module.
//!
//! One file per routing engine service:
//! - `route`: route through two or more waypoints
//! - `nearest`: snap a point to the road network
//! - `table`: duration/distance matrix
//!
//! `common` holds the shared argument types and encoders.

pub mod common;
pub mod nearest;
pub mod route;
pub mod table;

pub use common::{Coordinate, Profile};
pub use nearest::{NearestParams, NearestTool};
pub use route::{Geometries, Overview, RouteParams, RouteTool};
pub use table::{TableParams, TableTool};
