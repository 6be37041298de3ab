//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file for better maintainability.

pub mod osrm;

pub use osrm::{
    Coordinate, Geometries, NearestParams, NearestTool, Overview, Profile, RouteParams, RouteTool,
    TableParams, TableTool,
};
