//! Core module containing shared infrastructure components.
//!
//! This module provides the foundational building blocks for the MCP server,
//! including error handling, configuration, the routing engine client, server
//! lifecycle management and transport layer abstractions.

pub mod config;
pub mod error;
pub mod osrm;
pub mod server;
pub mod transport;

pub use config::{Config, OsrmConfig};
pub use error::{Error, Result};
pub use osrm::{HttpOsrmClient, OsrmError, OsrmRequest, OsrmTransport, UpstreamResponse};
pub use server::McpServer;
pub use transport::{TransportConfig, TransportService};
