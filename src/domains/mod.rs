//! Domains module containing business logic organized by bounded contexts.
//!
//! The server has a single domain: `tools`, the routing operations exposed
//! to MCP clients.

pub mod tools;
