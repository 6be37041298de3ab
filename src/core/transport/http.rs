//! HTTP transport implementation.
//!
//! Stateless JSON-RPC 2.0 over POST, so plain HTTP clients (curl, scripts)
//! can call the routing tools without an MCP session library. Tool calls go
//! through the name-based registry and end in the same dispatcher as the
//! STDIO/TCP transports.
//!
//! Besides the RPC path, `GET /health` reports the configured routing engine
//! and `GET /` lists the available tools.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, info, instrument, warn};

use super::{TransportError, TransportResult, config::HttpConfig};
use crate::core::McpServer;

const PROTOCOL_VERSION: &str = "2024-11-05";

const INVALID_REQUEST: i32 = -32600;
const METHOD_NOT_FOUND: i32 = -32601;
const INVALID_PARAMS: i32 = -32602;

/// HTTP transport handler.
pub struct HttpTransport {
    config: HttpConfig,
}

/// JSON-RPC request structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

impl JsonRpcRequest {
    /// Requests without an id are notifications and get no response body.
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

/// JSON-RPC response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
}

impl JsonRpcResponse {
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: Option<Value>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
            }),
        }
    }
}

/// Parameters of a `tools/call` request.
#[derive(Debug, Deserialize)]
struct ToolCallParams {
    name: String,
    #[serde(default)]
    arguments: Option<Value>,
}

/// The JSON-RPC methods understood over HTTP.
#[derive(Debug, PartialEq, Eq)]
enum RpcMethod<'a> {
    Initialize,
    Ping,
    ToolsList,
    ToolsCall,
    Notification(&'a str),
    Unknown(&'a str),
}

impl<'a> RpcMethod<'a> {
    fn parse(method: &'a str) -> Self {
        match method {
            "initialize" => Self::Initialize,
            "ping" => Self::Ping,
            "tools/list" => Self::ToolsList,
            "tools/call" => Self::ToolsCall,
            m if m.starts_with("notifications/") => Self::Notification(m),
            m => Self::Unknown(m),
        }
    }
}

impl HttpTransport {
    /// Create a new HTTP transport with the given config.
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Build the axum router serving `server`.
    pub fn router(&self, server: McpServer) -> Router {
        let app = Router::new()
            .route(&self.config.rpc_path, post(handle_rpc))
            .route("/health", get(health_check))
            .route("/", get(root_handler))
            .with_state(server);

        if self.config.enable_cors {
            app.layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            )
        } else {
            app
        }
    }

    /// Run the HTTP transport.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.address();
        let app = self.router(server);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        info!(
            "Ready - listening on {} (JSON-RPC at POST {}, CORS {})",
            addr,
            self.config.rpc_path,
            if self.config.enable_cors { "on" } else { "off" }
        );

        axum::serve(listener, app)
            .await
            .map_err(|e| TransportError::http(e.to_string()))
    }
}

async fn root_handler(State(server): State<McpServer>) -> impl IntoResponse {
    let tools: Vec<Value> = server
        .list_tools()
        .into_iter()
        .map(|t| t["name"].clone())
        .collect();

    Json(serde_json::json!({
        "name": server.name(),
        "version": server.version(),
        "transport": "HTTP",
        "protocol": "JSON-RPC 2.0",
        "tools": tools
    }))
}

async fn health_check(State(server): State<McpServer>) -> impl IntoResponse {
    let osrm = &server.config().osrm;
    Json(serde_json::json!({
        "status": "healthy",
        "osrm": {
            "base_url": osrm.base_url,
            "timeout_secs": osrm.timeout_secs
        },
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

#[instrument(skip_all, fields(method = %request.method))]
async fn handle_rpc(State(server): State<McpServer>, Json(request): Json<JsonRpcRequest>) -> Response {
    match process_request(&server, request).await {
        Some(response) => (StatusCode::OK, Json(response)).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

/// Process one JSON-RPC message; `None` means nothing is sent back.
async fn process_request(server: &McpServer, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
    if request.jsonrpc != "2.0" {
        return Some(JsonRpcResponse::error(
            request.id,
            INVALID_REQUEST,
            "Invalid Request",
        ));
    }

    let response = match RpcMethod::parse(&request.method) {
        RpcMethod::Initialize => JsonRpcResponse::success(
            request.id.clone(),
            serde_json::json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": { "tools": {} },
                "serverInfo": {
                    "name": server.name(),
                    "version": server.version()
                },
                "instructions": server.instructions()
            }),
        ),
        RpcMethod::Ping => JsonRpcResponse::success(request.id.clone(), serde_json::json!({})),
        RpcMethod::ToolsList => JsonRpcResponse::success(
            request.id.clone(),
            serde_json::json!({ "tools": server.list_tools() }),
        ),
        RpcMethod::ToolsCall => call_tool(server, request.id.clone(), request.params.clone()).await,
        RpcMethod::Notification(method) => {
            debug!("Notification: {}", method);
            return None;
        }
        RpcMethod::Unknown(method) => {
            warn!("Unknown method: {}", method);
            JsonRpcResponse::error(request.id.clone(), METHOD_NOT_FOUND, "Method not found")
        }
    };

    if request.is_notification() {
        None
    } else {
        Some(response)
    }
}

async fn call_tool(server: &McpServer, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
    let params: ToolCallParams = match params.map(serde_json::from_value) {
        Some(Ok(params)) => params,
        Some(Err(e)) => {
            return JsonRpcResponse::error(id, INVALID_PARAMS, format!("Invalid params: {}", e));
        }
        None => return JsonRpcResponse::error(id, INVALID_PARAMS, "Missing params"),
    };

    let arguments = params
        .arguments
        .unwrap_or_else(|| Value::Object(Default::default()));

    match server.call_tool(&params.name, arguments).await {
        Ok(result) => JsonRpcResponse::success(id, result),
        Err(e) => JsonRpcResponse::error(id, INVALID_PARAMS, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use crate::core::osrm::mock::MockTransport;
    use serde_json::json;
    use std::sync::Arc;

    fn test_server(mock: Arc<MockTransport>) -> McpServer {
        McpServer::with_transport(Config::default(), mock)
    }

    fn rpc(method: &str, params: Value) -> JsonRpcRequest {
        JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: Some(json!(1)),
            method: method.to_string(),
            params: Some(params),
        }
    }

    #[test]
    fn test_method_parsing() {
        assert_eq!(RpcMethod::parse("tools/call"), RpcMethod::ToolsCall);
        assert_eq!(
            RpcMethod::parse("notifications/initialized"),
            RpcMethod::Notification("notifications/initialized")
        );
        assert_eq!(RpcMethod::parse("resources/list"), RpcMethod::Unknown("resources/list"));
    }

    #[tokio::test]
    async fn test_tools_list() {
        let server = test_server(Arc::new(MockTransport::ok("{}")));
        let response = process_request(&server, rpc("tools/list", json!({}))).await.unwrap();

        let tools = response.result.unwrap()["tools"].clone();
        assert_eq!(tools.as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_tools_call_unknown_tool() {
        let mock = Arc::new(MockTransport::ok("{}"));
        let server = test_server(mock.clone());

        let response = process_request(
            &server,
            rpc("tools/call", json!({ "name": "foo", "arguments": {} })),
        )
        .await
        .unwrap();

        let result = response.result.unwrap();
        assert_eq!(result["content"][0]["text"], json!("Unknown tool: foo"));
        assert_eq!(result["isError"], json!(true));
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_tools_call_nearest() {
        let mock = Arc::new(MockTransport::ok(r#"{"code":"Ok"}"#));
        let server = test_server(mock.clone());

        let response = process_request(
            &server,
            rpc(
                "tools/call",
                json!({ "name": "nearest", "arguments": { "longitude": 13.4, "latitude": 52.5 } }),
            ),
        )
        .await
        .unwrap();

        assert!(response.error.is_none());
        assert_eq!(mock.calls()[0].path, "/nearest/v1/driving/13.4,52.5");
    }

    #[tokio::test]
    async fn test_tools_call_invalid_arguments() {
        let server = test_server(Arc::new(MockTransport::ok("{}")));
        let response = process_request(
            &server,
            rpc("tools/call", json!({ "name": "route", "arguments": { "coordinates": [] } })),
        )
        .await
        .unwrap();

        assert_eq!(response.error.unwrap().code, INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_tools_call_without_name() {
        let server = test_server(Arc::new(MockTransport::ok("{}")));
        let response = process_request(&server, rpc("tools/call", json!({ "arguments": {} })))
            .await
            .unwrap();

        assert_eq!(response.error.unwrap().code, INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_rejects_wrong_jsonrpc_version() {
        let server = test_server(Arc::new(MockTransport::ok("{}")));
        let mut request = rpc("tools/list", json!({}));
        request.jsonrpc = "1.0".to_string();

        let response = process_request(&server, request).await.unwrap();
        assert_eq!(response.error.unwrap().code, INVALID_REQUEST);
    }

    #[tokio::test]
    async fn test_notification_has_no_response() {
        let server = test_server(Arc::new(MockTransport::ok("{}")));
        let mut request = rpc("notifications/initialized", json!({}));
        request.id = None;

        assert!(process_request(&server, request).await.is_none());
    }

    #[tokio::test]
    async fn test_initialize_reports_tools_capability() {
        let server = test_server(Arc::new(MockTransport::ok("{}")));
        let response = process_request(&server, rpc("initialize", json!({}))).await.unwrap();

        let result = response.result.unwrap();
        assert_eq!(result["protocolVersion"], json!(PROTOCOL_VERSION));
        assert!(result["capabilities"]["tools"].is_object());
        assert!(
            result["instructions"]
                .as_str()
                .unwrap()
                .contains("mock://osrm")
        );
    }
}
