/// MCP (Model Context Protocol) message structures and JSON-RPC handling
///
/// This module defines the JSON-RPC message format that MCP clients use to
/// talk to the STRING bridge, and the result shapes the bridge sends back.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Protocol version reported when the client does not ask for one
pub const DEFAULT_PROTOCOL_VERSION: &str = "2025-03-26";

/// Name reported in `serverInfo`
pub const SERVER_NAME: &str = "string-mcp";

/// Incoming JSON-RPC 2.0 message
///
/// A message whose `id` is missing or `null` is a notification and is never
/// answered. Everything else is a request.
#[derive(Debug, Deserialize)]
pub struct JsonRpcMessage {
    /// JSON-RPC version; not checked, so any JSON value is accepted
    #[serde(default)]
    pub jsonrpc: Option<Value>,
    /// Request identifier; `None` for notifications
    #[serde(default)]
    pub id: Option<Value>,
    /// The method to call (e.g., "tools/call"); a non-string is an unknown method
    #[serde(default)]
    pub method: Option<Value>,
    /// Parameters for the method call
    #[serde(default)]
    pub params: Option<Value>,
}

impl JsonRpcMessage {
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }

    /// The method name, if it is a string
    pub fn method_name(&self) -> Option<&str> {
        self.method.as_ref().and_then(Value::as_str)
    }
}

/// Render a possibly missing, possibly non-string field for messages
///
/// Strings are shown bare, other values as compact JSON, absence as `None`.
pub fn display_field(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "None".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// JSON-RPC 2.0 response message
///
/// Exactly one of `result` and `error` is set.
#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    /// JSON-RPC version (always "2.0")
    pub jsonrpc: String,
    /// Request ID that we're responding to
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error information
#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    /// Error code (standard JSON-RPC codes)
    pub code: i32,
    /// Human-readable error message
    pub message: String,
}

/// MCP tool call parameters
#[derive(Debug, Default, Deserialize)]
pub struct ToolCallParams {
    /// Name of the tool to call (e.g., "map_identifiers"); kept raw so a
    /// mistyped name still shows up in the error text
    #[serde(default)]
    pub name: Option<Value>,
    /// Arguments to pass to the tool
    #[serde(default)]
    pub arguments: Value,
}

/// MCP tool call result
///
/// Always carries `isError` and exactly one text block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolCallResult {
    /// Whether this is an error result
    #[serde(rename = "isError")]
    pub is_error: bool,
    /// Tool execution results
    pub content: Vec<ToolContent>,
}

/// Content returned by a tool
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolContent {
    /// Type of content (always "text")
    #[serde(rename = "type")]
    pub content_type: String,
    /// The actual content/result
    pub text: String,
}

/// MCP server capabilities
#[derive(Debug, Serialize)]
pub struct ServerCapabilities {
    pub tools: ToolsCapability,
}

/// Tools capability information
#[derive(Debug, Serialize)]
pub struct ToolsCapability {
    /// Tools can be invoked through `tools/call`
    pub executable: bool,
}

/// MCP initialization request
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeParams {
    /// MCP protocol version the client asked for, echoed back untouched
    #[serde(default)]
    pub protocol_version: Option<Value>,
}

/// MCP initialization response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeResult {
    /// Echo of the client's protocol version
    pub protocol_version: Value,
    pub capabilities: ServerCapabilities,
    pub server_info: ServerInfo,
}

/// Information about the bridge
#[derive(Debug, Serialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

// JSON-RPC error codes (standard codes)
pub mod error_codes {
    /// Method not found - The requested method doesn't exist
    pub const METHOD_NOT_FOUND: i32 = -32601;
    /// Internal error - Internal JSON-RPC error
    pub const INTERNAL_ERROR: i32 = -32603;
}

impl JsonRpcResponse {
    /// Create a successful response
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response
    pub fn error(id: Value, code: i32, message: String) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError { code, message }),
        }
    }
}

impl ToolCallResult {
    /// Create a successful tool result with text content
    pub fn success(text: String) -> Self {
        Self {
            is_error: false,
            content: vec![ToolContent {
                content_type: "text".to_string(),
                text,
            }],
        }
    }

    /// Create an error tool result
    pub fn error(error_message: String) -> Self {
        Self {
            is_error: true,
            content: vec![ToolContent {
                content_type: "text".to_string(),
                text: format!("Error: {}", error_message),
            }],
        }
    }
}

impl InitializeResult {
    pub fn new(protocol_version: Option<Value>) -> Self {
        Self {
            protocol_version: protocol_version
                .filter(|v| !v.is_null())
                .unwrap_or_else(|| Value::from(DEFAULT_PROTOCOL_VERSION)),
            capabilities: ServerCapabilities {
                tools: ToolsCapability { executable: true },
            },
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }
}
