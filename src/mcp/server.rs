//! Request dispatch and the stdio transport

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};

use super::protocol::{
    INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST, JSONRPC_VERSION, JsonRpcRequest,
    JsonRpcResponse, MCP_PROTOCOL_VERSION, METHOD_NOT_FOUND, SERVER_INSTRUCTIONS, SERVER_NAME,
};
use super::tools::{ToolCall, tool_definitions, tool_error, tool_success};
use crate::finder::SunshineFinder;
use crate::location_provider::LocationProvider;
use crate::weather::WeatherProvider;
use crate::{Result, SunshineError, VERSION};

#[derive(Debug, Deserialize)]
struct CallToolParams {
    name: String,
    #[serde(default)]
    arguments: Option<Value>,
}

/// Tool server backed by one shared finder
pub struct McpServer<L, W> {
    finder: Arc<SunshineFinder<L, W>>,
}

impl<L, W> Clone for McpServer<L, W> {
    fn clone(&self) -> Self {
        Self {
            finder: Arc::clone(&self.finder),
        }
    }
}

impl<L, W> McpServer<L, W>
where
    L: LocationProvider + 'static,
    W: WeatherProvider,
{
    #[must_use]
    pub fn new(finder: SunshineFinder<L, W>) -> Self {
        Self {
            finder: Arc::new(finder),
        }
    }

    /// Handle one raw message. Returns `None` for notifications.
    pub async fn handle_message(&self, message: &str) -> Option<JsonRpcResponse> {
        match serde_json::from_str::<Value>(message) {
            Ok(value) => self.handle_value(value).await,
            Err(e) => {
                warn!("Invalid JSON-RPC message: {}", e);
                Some(JsonRpcResponse::parse_error())
            }
        }
    }

    /// Handle one decoded message
    pub async fn handle_value(&self, value: Value) -> Option<JsonRpcResponse> {
        let id = value.get("id").cloned();

        match serde_json::from_value::<JsonRpcRequest>(value) {
            Ok(request) => self.handle_request(request).await,
            Err(e) => {
                warn!("Failed to parse JSON-RPC request: {}", e);
                Some(JsonRpcResponse::error(
                    id,
                    INVALID_REQUEST,
                    format!("Invalid Request: {e}"),
                ))
            }
        }
    }

    /// Dispatch a request; notifications are processed but never answered
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.jsonrpc != JSONRPC_VERSION {
            return Some(JsonRpcResponse::error(
                request.id,
                INVALID_REQUEST,
                format!("Unsupported jsonrpc version: {}", request.jsonrpc),
            ));
        }

        if request.is_notification() {
            debug!("Received notification: {}", request.method);
            return None;
        }

        debug!("Handling request: {}", request.method);
        let id = request.id;

        let response = match request.method.as_str() {
            "initialize" => {
                JsonRpcResponse::success(id, Self::initialize_result(request.params.as_ref()))
            }
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => JsonRpcResponse::success(
                id,
                json!({ "tools": tool_definitions(self.finder.default_radius_km()) }),
            ),
            "tools/call" => self.call_tool(id, request.params).await,
            other => JsonRpcResponse::error(
                id,
                METHOD_NOT_FOUND,
                format!("Method not found: {other}"),
            ),
        };

        Some(response)
    }

    fn initialize_result(params: Option<&Value>) -> Value {
        let protocol_version = params
            .and_then(|p| p.get("protocolVersion"))
            .and_then(Value::as_str)
            .unwrap_or(MCP_PROTOCOL_VERSION);

        json!({
            "protocolVersion": protocol_version,
            "capabilities": {
                "tools": { "listChanged": false }
            },
            "serverInfo": {
                "name": SERVER_NAME,
                "version": VERSION
            },
            "instructions": SERVER_INSTRUCTIONS
        })
    }

    async fn call_tool(&self, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
        let Some(params) = params else {
            return JsonRpcResponse::error(id, INVALID_PARAMS, "Missing params for tools/call");
        };

        let params: CallToolParams = match serde_json::from_value(params) {
            Ok(params) => params,
            Err(e) => {
                return JsonRpcResponse::error(
                    id,
                    INVALID_PARAMS,
                    format!("Invalid tools/call params: {e}"),
                );
            }
        };

        let call = match ToolCall::parse(
            &params.name,
            params.arguments,
            self.finder.default_radius_km(),
        ) {
            Ok(call) => call,
            Err(message) => return JsonRpcResponse::error(id, INVALID_PARAMS, message),
        };

        info!("Tool call: {}", params.name);

        match self.execute(call).await {
            Ok(payload) => JsonRpcResponse::success(id, tool_success(payload)),
            Err(SunshineError::General { message }) => {
                JsonRpcResponse::error(id, INTERNAL_ERROR, message)
            }
            Err(e) => {
                warn!("Tool {} failed: {}", params.name, e);
                JsonRpcResponse::success(id, tool_error(e.to_string()))
            }
        }
    }

    /// Run a parsed tool call against the finder
    pub async fn execute(&self, call: ToolCall) -> Result<Value> {
        match call {
            ToolCall::FindSunshine { radius_km } => {
                to_payload(&self.finder.find_sunshine(radius_km).await?)
            }
            ToolCall::WeatherAtLocation(coordinate) => {
                to_payload(&self.finder.weather_at(coordinate).await?)
            }
            ToolCall::CurrentLocation => to_payload(&self.finder.current_location().await?),
        }
    }

    /// Serve newline-delimited JSON-RPC on stdin/stdout until stdin closes
    pub async fn run_stdio(&self) -> Result<()> {
        info!("Tool server ready - listening on stdin/stdout");

        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            if let Some(response) = self.handle_message(&line).await {
                let json = serde_json::to_string(&response).map_err(|e| {
                    SunshineError::general(format!("JSON serialization failed: {e}"))
                })?;
                println!("{json}");
            }
        }

        info!("stdin closed, tool server stopping");
        Ok(())
    }
}

fn to_payload<T: Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value)
        .map_err(|e| SunshineError::general(format!("Failed to serialize result: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location_provider::FixedLocationProvider;
    use crate::models::{Coordinate, WeatherObservation};
    use async_trait::async_trait;

    struct Clear;

    #[async_trait]
    impl WeatherProvider for Clear {
        async fn fetch(&self, _coordinate: Coordinate) -> Result<WeatherObservation> {
            Ok(WeatherObservation::new(22.5, 0.0, 0.0, 5.0, "t"))
        }
    }

    fn server() -> McpServer<FixedLocationProvider, Clear> {
        McpServer::new(SunshineFinder::with_defaults(
            FixedLocationProvider::new(Coordinate::new(52.0, 5.0)),
            Clear,
        ))
    }

    #[tokio::test]
    async fn test_initialize_echoes_protocol_version() {
        let response = server()
            .handle_message(
                r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2024-11-05"}}"#,
            )
            .await
            .unwrap();
        let result = response.result.unwrap();
        assert_eq!(result["protocolVersion"], json!("2024-11-05"));
        assert_eq!(result["serverInfo"]["name"], json!("sunshine-finder"));
    }

    #[tokio::test]
    async fn test_notification_gets_no_response() {
        let response = server()
            .handle_message(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
            .await;
        assert!(response.is_none());
    }

    #[tokio::test]
    async fn test_parse_error() {
        let response = server().handle_message("{not json").await.unwrap();
        assert_eq!(response.error.unwrap().code, -32700);
    }

    #[tokio::test]
    async fn test_invalid_request() {
        let response = server()
            .handle_message(r#"{"jsonrpc":"2.0","id":3}"#)
            .await
            .unwrap();
        assert_eq!(response.error.unwrap().code, INVALID_REQUEST);
        assert_eq!(response.id, Some(json!(3)));

        let response = server()
            .handle_message(r#"{"jsonrpc":"1.0","id":4,"method":"ping"}"#)
            .await
            .unwrap();
        assert_eq!(response.error.unwrap().code, INVALID_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let response = server()
            .handle_message(r#"{"jsonrpc":"2.0","id":"a","method":"resources/list"}"#)
            .await
            .unwrap();
        assert_eq!(response.error.unwrap().code, METHOD_NOT_FOUND);
        assert_eq!(response.id, Some(json!("a")));
    }

    #[tokio::test]
    async fn test_current_location_tool() {
        let response = server()
            .handle_message(
                r#"{"jsonrpc":"2.0","id":2,"method":"tools/call","params":{"name":"get_current_location"}}"#,
            )
            .await
            .unwrap();
        let result = response.result.unwrap();
        assert_eq!(result["isError"], json!(false));
        assert_eq!(result["structuredContent"], json!({"lat": 52.0, "lon": 5.0}));
    }

    #[tokio::test]
    async fn test_unknown_tool_is_invalid_params() {
        let response = server()
            .handle_message(
                r#"{"jsonrpc":"2.0","id":2,"method":"tools/call","params":{"name":"nope"}}"#,
            )
            .await
            .unwrap();
        assert_eq!(response.error.unwrap().code, INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_find_sunshine_uses_configured_radius() {
        let mut config = crate::config::SunshineConfig::default();
        config.search.default_radius_km = 50.0;
        let server = McpServer::new(SunshineFinder::new(
            FixedLocationProvider::new(Coordinate::new(52.0, 5.0)),
            Clear,
            &config,
        ));

        let response = server
            .handle_message(
                r#"{"jsonrpc":"2.0","id":6,"method":"tools/call","params":{"name":"find_sunshine"}}"#,
            )
            .await
            .unwrap();
        let result = response.result.unwrap();
        assert_eq!(result["structuredContent"]["total_checked"], json!(9));

        let response = server
            .handle_message(r#"{"jsonrpc":"2.0","id":7,"method":"tools/list"}"#)
            .await
            .unwrap();
        let tools = response.result.unwrap()["tools"].clone();
        assert_eq!(
            tools[0]["inputSchema"]["properties"]["radius_km"]["default"],
            json!(50.0)
        );
    }

    #[tokio::test]
    async fn test_tool_failure_is_error_result() {
        let response = server()
            .handle_message(
                r#"{"jsonrpc":"2.0","id":5,"method":"tools/call","params":{"name":"find_sunshine","arguments":{"radius_km":-5}}}"#,
            )
            .await
            .unwrap();
        assert!(!response.is_error());
        let result = response.result.unwrap();
        assert_eq!(result["isError"], json!(true));
        assert!(
            result["content"][0]["text"]
                .as_str()
                .unwrap()
                .contains("Radius")
        );
    }
}
