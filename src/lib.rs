/// Public library interface for the STRING MCP bridge
///
/// This module exports the server, the STRING client and the tool table so
/// they can be driven by the binary or by tests.

use thiserror::Error;

pub mod client;
pub mod config;
pub mod mcp;
pub mod tools;

// Re-export public modules and types
pub use client::{ClientError, StringApi, StringClient};
pub use config::BridgeConfig;
pub use mcp::McpServer;
pub use tools::{Tool, ToolError, ToolRegistry};

/// Errors that can stop the server
///
/// Tool failures never surface here; they are reported to the MCP client
/// inside the tool result.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("HTTP client error: {0}")]
    Client(#[from] ClientError),

    #[error("Tool table error: {0}")]
    Tools(#[from] ToolError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// STRING bridge: one HTTP client and the validated tool table
pub struct StringBridgeServer {
    client: StringClient,
    registry: ToolRegistry,
}

impl StringBridgeServer {
    /// Create the bridge with the given configuration
    ///
    /// Fails if the HTTP client cannot be built or the tool table is
    /// inconsistent.
    pub fn new(config: BridgeConfig) -> Result<Self, ServerError> {
        tracing::info!(
            "Initializing STRING bridge (host {}, caller identity {})",
            config.version_url,
            config.caller_identity
        );

        let client = StringClient::new(config)?;
        let registry = ToolRegistry::new()?;

        Ok(Self { client, registry })
    }

    /// Run the MCP server, handling JSON-RPC requests over stdin/stdout
    ///
    /// This method returns once stdin is closed.
    pub async fn run(self) -> Result<(), ServerError> {
        tracing::info!("Serving {} tools", self.registry.len());

        let mcp_server = McpServer::new(Box::new(self.client), self.registry);
        mcp_server.run().await
    }

    /// Get a reference to the HTTP client (useful for testing)
    pub fn client(&self) -> &StringClient {
        &self.client
    }

    /// Get a reference to the tool table (useful for testing)
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }
}
