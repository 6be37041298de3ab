//! Routing engine (OSRM) access.
//!
//! - `request.rs` - encoded GET requests (path + ordered query)
//! - `client.rs` - the [`OsrmTransport`] seam and its `reqwest` implementation
//! - `error.rs` - upstream failure taxonomy

mod client;
mod error;
mod request;

#[cfg(test)]
pub(crate) mod mock;

pub use client::{HttpOsrmClient, OsrmTransport, UpstreamResponse};
pub use error::OsrmError;
pub use request::OsrmRequest;
