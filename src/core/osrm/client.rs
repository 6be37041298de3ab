//! Outbound HTTP access to the routing engine.
//!
//! The dispatcher talks to the routing engine through the [`OsrmTransport`]
//! trait so that the handle can be passed in explicitly and replaced in tests.
//! [`HttpOsrmClient`] is the production implementation built on `reqwest`.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use tracing::{debug, info, instrument, warn};

use super::{OsrmError, OsrmRequest};
use crate::core::config::OsrmConfig;

/// Raw answer from the routing engine.
///
/// The body is kept as text; this layer never maps it onto domain types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: String,
}

impl UpstreamResponse {
    /// Create a new response.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status code is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turn the response into the pretty-printed JSON text returned to callers.
    ///
    /// Key order is kept as received.
    pub fn into_pretty_json(self) -> Result<String, OsrmError> {
        if !self.is_success() {
            return Err(OsrmError::status(self.status, &self.body));
        }

        let value: serde_json::Value = serde_json::from_str(&self.body)
            .map_err(|e| OsrmError::MalformedBody(e.to_string()))?;

        serde_json::to_string_pretty(&value).map_err(|e| OsrmError::MalformedBody(e.to_string()))
    }
}

/// Something that can perform a GET against the routing engine.
#[async_trait]
pub trait OsrmTransport: Send + Sync {
    /// Issue a single GET for the encoded request.
    async fn get(&self, request: &OsrmRequest) -> Result<UpstreamResponse, OsrmError>;

    /// Description of the upstream endpoint, for logs and server info.
    fn endpoint(&self) -> String;
}

/// `reqwest`-backed routing engine client.
#[derive(Debug, Clone)]
pub struct HttpOsrmClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl HttpOsrmClient {
    /// Create a client for `base_url` with a fixed per-call timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, OsrmError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| OsrmError::Client(e.to_string()))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self {
            client,
            base_url,
            timeout,
        })
    }

    /// Create a client from the routing engine configuration.
    pub fn from_config(config: &OsrmConfig) -> Result<Self, OsrmError> {
        Self::new(config.base_url.clone(), config.timeout())
    }

    /// The base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for a request (without the query string).
    pub fn url(&self, request: &OsrmRequest) -> String {
        format!("{}{}", self.base_url, request.path)
    }
}

#[async_trait]
impl OsrmTransport for HttpOsrmClient {
    #[instrument(skip_all, fields(path = %request.path))]
    async fn get(&self, request: &OsrmRequest) -> Result<UpstreamResponse, OsrmError> {
        let url = self.url(request);
        let started = Instant::now();
        debug!("GET {}{}", self.base_url, request);

        let response = self
            .client
            .get(&url)
            .query(&request.query)
            .send()
            .await
            .map_err(|e| {
                warn!("Routing engine request failed: {}", e);
                OsrmError::from_reqwest(e, self.timeout)
            })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| OsrmError::from_reqwest(e, self.timeout))?;

        info!(
            status,
            elapsed_ms = started.elapsed().as_millis() as u64,
            bytes = body.len(),
            "Routing engine responded"
        );

        Ok(UpstreamResponse { status, body })
    }

    fn endpoint(&self) -> String {
        self.base_url.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve exactly one canned HTTP response and hand back the request head.
    async fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut head = Vec::new();
            let mut buf = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                head.extend_from_slice(&buf[..n]);
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();

            String::from_utf8_lossy(&head).to_string()
        });

        (format!("http://{}", addr), handle)
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = HttpOsrmClient::new("http://localhost:5001/", Duration::from_secs(30)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:5001");

        let request = OsrmRequest::new("/nearest/v1/driving/13.4,52.5");
        assert_eq!(
            client.url(&request),
            "http://localhost:5001/nearest/v1/driving/13.4,52.5"
        );
    }

    #[test]
    fn test_into_pretty_json_keeps_key_order() {
        let response = UpstreamResponse::new(200, r#"{"routes":[],"code":"Ok","waypoints":[]}"#);
        let text = response.into_pretty_json().unwrap();
        assert_eq!(text, "{\n  \"routes\": [],\n  \"code\": \"Ok\",\n  \"waypoints\": []\n}");
    }

    #[test]
    fn test_into_pretty_json_rejects_non_json() {
        let response = UpstreamResponse::new(200, "not json");
        let err = response.into_pretty_json().unwrap_err();
        assert!(matches!(err, OsrmError::MalformedBody(_)));
    }

    #[test]
    fn test_into_pretty_json_rejects_error_status() {
        let response = UpstreamResponse::new(404, "{}");
        let err = response.into_pretty_json().unwrap_err();
        assert!(matches!(err, OsrmError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_get_sends_path_and_encoded_query() {
        let (base_url, server) = serve_once("200 OK", r#"{"code":"Ok"}"#).await;
        let client = HttpOsrmClient::new(base_url, Duration::from_secs(5)).unwrap();

        let request = OsrmRequest::new("/table/v1/driving/13.38,52.51;13.39,52.52;13.4,52.53")
            .with_param("sources", "0;2");
        let response = client.get(&request).await.unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.body, r#"{"code":"Ok"}"#);

        let head = server.await.unwrap();
        assert!(
            head.starts_with(
                "GET /table/v1/driving/13.38,52.51;13.39,52.52;13.4,52.53?sources=0%3B2 HTTP/1.1"
            ),
            "unexpected request head: {}",
            head
        );
    }

    #[tokio::test]
    async fn test_get_returns_error_status_as_response() {
        let (base_url, server) = serve_once(
            "400 Bad Request",
            r#"{"code":"InvalidValue","message":"Invalid coordinate value."}"#,
        )
        .await;
        let client = HttpOsrmClient::new(base_url, Duration::from_secs(5)).unwrap();

        let response = client
            .get(&OsrmRequest::new("/nearest/v1/driving/500,500"))
            .await
            .unwrap();
        server.await.unwrap();

        assert_eq!(response.status, 400);
        let err = response.into_pretty_json().unwrap_err();
        assert!(err.to_string().contains("InvalidValue - Invalid coordinate value."));
    }

    #[tokio::test]
    async fn test_get_connection_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = HttpOsrmClient::new(format!("http://{}", addr), Duration::from_secs(5)).unwrap();
        let err = client
            .get(&OsrmRequest::new("/nearest/v1/driving/13.4,52.5"))
            .await
            .unwrap_err();

        assert!(matches!(err, OsrmError::Connect(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_get_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        // Accept connections and never answer.
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let client =
            HttpOsrmClient::new(format!("http://{}", addr), Duration::from_millis(200)).unwrap();
        let err = client
            .get(&OsrmRequest::new("/route/v1/driving/1,2;3,4"))
            .await
            .unwrap_err();

        assert!(matches!(err, OsrmError::Timeout(_)), "got {:?}", err);
    }
}
