//! OSRM MCP Server Library
//!
//! This crate exposes an OSRM routing engine over the Model Context Protocol
//! (MCP). Three tools are offered (`route`, `nearest`, `table`); each call is
//! encoded into OSRM's HTTP API, sent as a single GET, and the JSON answer is
//! returned to the client verbatim (pretty-printed).
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the routing engine client,
//!   the MCP server handler and the transports
//! - **domains**: business logic organized by bounded contexts
//!   - **tools**: the tool catalog and the request dispatcher
//!
//! # Example
//!
//! ```rust,no_run
//! use osrm_mcp_server::{core::McpServer, core::Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config)?;
//!     // Start the server...
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
