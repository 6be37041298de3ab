//! Routing engine error types.

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while talking to the routing engine.
#[derive(Debug, Error)]
pub enum OsrmError {
    /// The routing engine answered with a non-success status code.
    #[error("Routing engine returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// The request did not complete within the configured timeout.
    #[error("Routing engine request timed out after {}s", .0.as_secs_f64())]
    Timeout(Duration),

    /// The routing engine could not be reached.
    #[error("Could not connect to routing engine: {0}")]
    Connect(String),

    /// Any other transport-level failure.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The response body was not valid JSON.
    #[error("Malformed response from routing engine: {0}")]
    MalformedBody(String),

    /// The HTTP client could not be built.
    #[error("Failed to create HTTP client: {0}")]
    Client(String),
}

impl OsrmError {
    /// Build a status error from an upstream status code and body.
    ///
    /// OSRM reports failures as `{"code": "...", "message": "..."}`; when the
    /// body has that shape the code and message are appended to the reason.
    pub fn status(status: u16, body: &str) -> Self {
        let reason = reqwest::StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("Unknown Status");

        let detail = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| {
                let code = v.get("code").and_then(|c| c.as_str()).map(str::to_string);
                let message = v.get("message").and_then(|m| m.as_str()).map(str::to_string);
                match (code, message) {
                    (Some(code), Some(message)) => Some(format!("{} - {}", code, message)),
                    (Some(code), None) => Some(code),
                    (None, Some(message)) => Some(message),
                    (None, None) => None,
                }
            });

        let message = match detail {
            Some(detail) => format!("{} ({})", reason, detail),
            None => reason.to_string(),
        };

        Self::Status { status, message }
    }

    /// Classify a reqwest failure.
    pub fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout)
        } else if err.is_connect() {
            Self::Connect(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}
