//! Client-facing transports.
//!
//! The routing tools can be reached over:
//! - **STDIO** (feature `stdio`, default): one session on stdin/stdout
//! - **TCP** (feature `tcp`): one MCP session per accepted connection
//! - **HTTP** (feature `http`): stateless JSON-RPC over POST, plus `/health`
//!
//! STDIO and TCP speak MCP through rmcp's router; HTTP dispatches tool calls
//! by name through the registry. Both paths end in the same dispatcher.

mod config;
mod error;
mod service;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "tcp")]
pub mod tcp;

#[cfg(feature = "stdio")]
pub mod stdio;

pub use config::TransportConfig;
pub use error::{TransportError, TransportResult};
pub use service::TransportService;

#[cfg(feature = "tcp")]
pub use config::TcpConfig;

#[cfg(feature = "http")]
pub use config::HttpConfig;
