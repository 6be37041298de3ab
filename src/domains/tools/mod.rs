//! Tools domain module.
//!
//! This module exposes the routing engine operations as MCP tools.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `dispatcher.rs` - Typed operation enum and the dispatcher that calls OSRM
//! - `router.rs` - ToolRouter builder for STDIO/TCP transport
//! - `registry.rs` - Tool catalog and HTTP dispatch by name
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Operation
//!
//! 1. Create a new file in `definitions/osrm/` with params, `request()`,
//!    `to_tool()` and `create_route()`
//! 2. Add a variant to `OsrmOperation` in `dispatcher.rs`
//! 3. Add the route in `router.rs` and the tool in `registry.rs`

pub mod definitions;
pub mod dispatcher;
mod error;
mod registry;
pub mod router;

pub use dispatcher::{OsrmDispatcher, OsrmOperation};
pub use error::ToolError;
pub use registry::ToolRegistry;
pub use router::build_tool_router;
