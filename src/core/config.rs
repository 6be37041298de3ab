//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables (optionally via a `.env` file) or
//! defaults. Configuration is read once at startup and shared read-only.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

/// Default routing engine endpoint.
pub const DEFAULT_OSRM_BASE_URL: &str = "http://localhost:5001";

/// Default per-call timeout towards the routing engine, in seconds.
pub const DEFAULT_OSRM_TIMEOUT_SECS: u64 = 30;

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Routing engine endpoint configuration.
    pub osrm: OsrmConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Routing engine (OSRM) configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OsrmConfig {
    /// Base URL of the routing engine, without trailing slash.
    pub base_url: String,

    /// Per-call timeout in seconds.
    pub timeout_secs: u64,
}

impl OsrmConfig {
    /// The per-call timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Load routing engine settings from `OSRM_BASE_URL` / `OSRM_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(base_url) = std::env::var("OSRM_BASE_URL") {
            let base_url = base_url.trim().trim_end_matches('/');
            if base_url.is_empty() {
                warn!("OSRM_BASE_URL is empty, using {}", DEFAULT_OSRM_BASE_URL);
            } else {
                config.base_url = base_url.to_string();
            }
        }

        if let Ok(timeout) = std::env::var("OSRM_TIMEOUT_SECS") {
            match timeout.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout_secs = secs,
                _ => warn!(
                    "Invalid OSRM_TIMEOUT_SECS '{}', using {}s",
                    timeout, DEFAULT_OSRM_TIMEOUT_SECS
                ),
            }
        }

        config
    }
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OSRM_BASE_URL.to_string(),
            timeout_secs: DEFAULT_OSRM_TIMEOUT_SECS,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "osrm-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
            osrm: OsrmConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Server settings use the `MCP_` prefix (`MCP_SERVER_NAME`,
    /// `MCP_LOG_LEVEL`, `MCP_TRANSPORT`, ...); the routing engine uses
    /// `OSRM_BASE_URL` and `OSRM_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        config.transport = TransportConfig::from_env();
        config.osrm = OsrmConfig::from_env();

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    fn clear_osrm_env() {
        unsafe {
            std::env::remove_var("OSRM_BASE_URL");
            std::env::remove_var("OSRM_TIMEOUT_SECS");
        }
    }

    #[test]
    fn test_osrm_defaults() {
        let config = Config::default();
        assert_eq!(config.osrm.base_url, "http://localhost:5001");
        assert_eq!(config.osrm.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_osrm_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("OSRM_BASE_URL", "http://osrm.internal:5000/");
            std::env::set_var("OSRM_TIMEOUT_SECS", "12");
        }
        let config = OsrmConfig::from_env();
        assert_eq!(config.base_url, "http://osrm.internal:5000");
        assert_eq!(config.timeout_secs, 12);
        clear_osrm_env();
    }

    #[test]
    fn test_osrm_invalid_timeout_falls_back() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("OSRM_TIMEOUT_SECS", "0");
        }
        assert_eq!(OsrmConfig::from_env().timeout_secs, 30);

        unsafe {
            std::env::set_var("OSRM_TIMEOUT_SECS", "soon");
        }
        assert_eq!(OsrmConfig::from_env().timeout_secs, 30);
        clear_osrm_env();
    }

    #[test]
    fn test_osrm_empty_base_url_ignored() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("OSRM_BASE_URL", "  ");
        }
        assert_eq!(OsrmConfig::from_env().base_url, DEFAULT_OSRM_BASE_URL);
        clear_osrm_env();
    }
}
