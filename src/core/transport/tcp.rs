//! TCP transport implementation.
//!
//! Line-delimited JSON-RPC over raw TCP sockets. Each accepted connection is
//! an independent MCP session; all sessions share one server and therefore
//! one routing engine client.

use std::net::SocketAddr;
use std::time::Duration;

use rmcp::ServiceExt;
use tokio::net::{TcpListener, TcpStream};
use tracing::{Instrument, info, info_span, warn};

use super::{TransportError, TransportResult, config::TcpConfig};
use crate::core::McpServer;

/// Back-off after a failed `accept`, so a persistent error does not spin.
const ACCEPT_RETRY_DELAY: Duration = Duration::from_millis(100);

/// TCP transport handler.
pub struct TcpTransport {
    config: TcpConfig,
}

impl TcpTransport {
    /// Create a new TCP transport with the given config.
    pub fn new(config: TcpConfig) -> Self {
        Self { config }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Bind the listening socket.
    pub async fn bind(&self) -> TransportResult<TcpListener> {
        let addr = self.address();
        TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(addr, e))
    }

    /// Run the TCP transport. Never returns once bound.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let listener = self.bind().await?;
        info!(
            "Ready - listening on {} (JSON-RPC over TCP, routing engine {})",
            self.address(),
            server.config().osrm.base_url
        );

        loop {
            let (stream, peer) = match listener.accept().await {
                Ok(accepted) => accepted,
                Err(e) => {
                    warn!("Failed to accept connection: {}", e);
                    tokio::time::sleep(ACCEPT_RETRY_DELAY).await;
                    continue;
                }
            };

            if let Err(e) = stream.set_nodelay(true) {
                warn!("Failed to set TCP_NODELAY for {}: {}", peer, e);
            }

            let session = Self::serve_session(server.clone(), stream, peer)
                .instrument(info_span!("tcp_session", %peer));
            tokio::spawn(session);
        }
    }

    async fn serve_session(server: McpServer, stream: TcpStream, peer: SocketAddr) {
        info!("Accepted connection");

        let service = match server.serve(stream).await {
            Ok(service) => service,
            Err(e) => {
                warn!("Failed to initialize session for {}: {}", peer, e);
                return;
            }
        };

        match service.waiting().await {
            Ok(reason) => info!("Session closed: {:?}", reason),
            Err(e) => warn!("Session for {} ended with error: {}", peer, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bind_reports_address_in_use() {
        let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = taken.local_addr().unwrap().port();

        let transport = TcpTransport::new(TcpConfig {
            port,
            host: "127.0.0.1".to_string(),
        });

        match transport.bind().await {
            Err(TransportError::BindError { address, .. }) => {
                assert_eq!(address, format!("127.0.0.1:{}", port));
            }
            other => panic!("expected bind error, got {:?}", other.map(|_| ())),
        }
    }
}
