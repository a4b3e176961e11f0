/// MCP server implementation that handles JSON-RPC communication
///
/// This module implements the actual MCP server that:
/// 1. Reads JSON-RPC messages line by line
/// 2. Answers requests and ignores notifications
/// 3. Routes tool calls to the STRING client
/// 4. Writes one compact JSON-RPC response line per request
///
/// Lines are handled strictly one after another; a slow STRING call stalls
/// the loop until it completes.

use futures::FutureExt;
use serde::Serialize;
use serde_json::{json, Value};
use std::any::Any;
use std::panic::AssertUnwindSafe;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, error, info, warn};

use crate::client::StringApi;
use crate::mcp::protocol::*;
use crate::tools::{self, ToolRegistry};
use crate::ServerError;

/// MCP server bridging JSON-RPC to the STRING API
pub struct McpServer {
    /// Client used for every tool call
    api: Box<dyn StringApi>,
    /// Known tools and their descriptors
    registry: ToolRegistry,
}

impl McpServer {
    /// Create a new MCP server
    pub fn new(api: Box<dyn StringApi>, registry: ToolRegistry) -> Self {
        Self { api, registry }
    }

    /// Run the MCP server, handling JSON-RPC over stdin/stdout
    pub async fn run(&self) -> Result<(), ServerError> {
        info!("STRING-DB MCP server ready, waiting for JSON-RPC requests...");

        let stdin = BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();
        self.serve(stdin, stdout).await
    }

    /// Handle every line from `reader` until it is exhausted
    pub async fn serve<R, W>(&self, mut reader: R, mut writer: W) -> Result<(), ServerError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut buffer = Vec::new();

        loop {
            buffer.clear();

            match reader.read_until(b'\n', &mut buffer).await {
                Ok(0) => {
                    info!("MCP server shutting down (input closed)");
                    break;
                }
                Ok(_) => {
                    let line = match std::str::from_utf8(&buffer) {
                        Ok(line) => line,
                        Err(e) => {
                            warn!("Skipping line that is not UTF-8: {}", e);
                            continue;
                        }
                    };

                    if let Some(response) = self.process_line(line).await {
                        let response_str = serde_json::to_string(&response)?;

                        writer.write_all(response_str.as_bytes()).await?;
                        writer.write_all(b"\n").await?;
                        writer.flush().await?;

                        debug!("Sent response: {}", response_str);
                    }
                }
                Err(e) => {
                    error!("Failed to read input: {}", e);
                    return Err(e.into());
                }
            }
        }

        Ok(())
    }

    /// Process a single line of JSON-RPC input
    ///
    /// Returns `None` for blank lines, unparseable input and notifications.
    pub async fn process_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        debug!("Processing message: {}", line);

        // No reliable id to answer with, so bad input is only logged
        let message: JsonRpcMessage = match serde_json::from_str(line) {
            Ok(message) => message,
            Err(e) => {
                warn!("Bad JSON from host: {}", e);
                return None;
            }
        };

        let method = message.method_name();
        let Some(id) = message.id.clone() else {
            self.handle_notification(method);
            return None;
        };

        Some(self.handle_request(id, &message).await)
    }

    fn handle_notification(&self, method: Option<&str>) {
        match method {
            Some("notifications/initialized") => info!("Client says: initialized"),
            other => debug!("Ignoring notification {:?}", other),
        }
    }

    /// Handle a JSON-RPC request
    async fn handle_request(&self, id: Value, message: &JsonRpcMessage) -> JsonRpcResponse {
        let params = message.params.clone();
        match message.method_name() {
            Some("initialize") => self.handle_initialize(id, params),
            Some("tools/list") => self.handle_tools_list(id),
            Some("tools/call") => self.handle_tools_call(id, params).await,
            Some("resources/list") => JsonRpcResponse::success(id, json!({"resources": []})),
            Some("prompts/list") => JsonRpcResponse::success(id, json!({"prompts": []})),
            Some("ping") => JsonRpcResponse::success(id, json!({})),
            _ => JsonRpcResponse::error(
                id,
                error_codes::METHOD_NOT_FOUND,
                format!("Method not found: {}", display_field(message.method.as_ref())),
            ),
        }
    }

    fn respond<T: Serialize>(&self, id: Value, result: &T) -> JsonRpcResponse {
        match serde_json::to_value(result) {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err(e) => {
                error!("Failed to serialize result: {:?}", e);
                JsonRpcResponse::error(id, error_codes::INTERNAL_ERROR, format!("Internal error: {}", e))
            }
        }
    }

    /// Handle MCP initialization request
    fn handle_initialize(&self, id: Value, params: Option<Value>) -> JsonRpcResponse {
        let params: InitializeParams = params
            .and_then(|p| serde_json::from_value(p).ok())
            .unwrap_or_default();

        info!(
            "MCP client connected (protocol {})",
            params
                .protocol_version
                .as_ref()
                .map_or_else(|| DEFAULT_PROTOCOL_VERSION.to_string(), |v| display_field(Some(v)))
        );

        self.respond(id, &InitializeResult::new(params.protocol_version))
    }

    /// Handle tools/list request
    fn handle_tools_list(&self, id: Value) -> JsonRpcResponse {
        self.respond(id, &json!({ "tools": self.registry.descriptors() }))
    }

    /// Handle tools/call request
    ///
    /// Always a JSON-RPC success; failures travel inside the tool result.
    async fn handle_tools_call(&self, id: Value, params: Option<Value>) -> JsonRpcResponse {
        let params: ToolCallParams = params
            .and_then(|p| serde_json::from_value(p).ok())
            .unwrap_or_default();

        let result = self.call_tool(params).await;
        self.respond(id, &result)
    }

    async fn call_tool(&self, params: ToolCallParams) -> ToolCallResult {
        let name = display_field(params.name.as_ref());
        let resolved = params
            .name
            .as_ref()
            .and_then(Value::as_str)
            .and_then(|n| self.registry.resolve(n));
        let Some(tool) = resolved else {
            warn!("Unknown tool requested: {}", name);
            return ToolCallResult::error(format!("Unknown tool: {}", name));
        };

        let call = tools::call_tool(self.api.as_ref(), tool, &params.arguments);
        match AssertUnwindSafe(call).catch_unwind().await {
            Ok(Ok(output)) => match output.render() {
                Ok(text) => ToolCallResult::success(text),
                Err(e) => {
                    error!("Failed to render output of {}: {:?}", name, e);
                    ToolCallResult::error(format!("Internal error: {}", e))
                }
            },
            Ok(Err(e)) => {
                if e.is_internal() {
                    error!("Tool {} failed: {:?}", name, e);
                } else {
                    warn!("Tool {} failed: {}", name, e);
                }
                ToolCallResult::error(e.user_message())
            }
            Err(panic) => {
                let detail = panic_message(panic.as_ref());
                error!("Tool {} panicked: {}", name, detail);
                ToolCallResult::error(format!("Internal error: {}", detail))
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "tool panicked".to_string()
    }
}
