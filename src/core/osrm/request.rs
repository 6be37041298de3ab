//! Encoded routing engine requests.

use std::fmt;

/// A single GET request against the routing engine, already encoded.
///
/// `path` is relative to the configured base URL. `query` holds the
/// parameters in the order they are sent; values are raw (not yet
/// percent-encoded).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OsrmRequest {
    pub path: String,
    pub query: Vec<(&'static str, String)>,
}

impl OsrmRequest {
    /// Create a request with no query parameters.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: Vec::new(),
        }
    }

    /// Append a query parameter.
    pub fn with_param(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.query.push((key, value.into()));
        self
    }

    /// Raw value of a query parameter, if present.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The query string as it goes on the wire (form-urlencoded).
    pub fn query_string(&self) -> String {
        serde_urlencoded::to_string(&self.query).unwrap_or_default()
    }
}

impl fmt::Display for OsrmRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.query.is_empty() {
            write!(f, "{}", self.path)
        } else {
            write!(f, "{}?{}", self.path, self.query_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_string_encodes_separators() {
        let request = OsrmRequest::new("/table/v1/driving/1,2;3,4")
            .with_param("sources", "0;2")
            .with_param("destinations", "1");
        assert_eq!(request.param("sources"), Some("0;2"));
        assert_eq!(request.query_string(), "sources=0%3B2&destinations=1");
        assert_eq!(
            request.to_string(),
            "/table/v1/driving/1,2;3,4?sources=0%3B2&destinations=1"
        );
    }

    #[test]
    fn test_display_without_query() {
        let request = OsrmRequest::new("/nearest/v1/driving/13.4,52.5");
        assert_eq!(request.query_string(), "");
        assert_eq!(request.to_string(), "/nearest/v1/driving/13.4,52.5");
    }
}
