/// Main entry point for the STRING MCP bridge
///
/// This file sets up logging, parses command line arguments, and starts the MCP server.
/// The server listens for JSON-RPC requests over stdin/stdout following the MCP protocol.

use clap::Parser;
use std::time::Duration;
use tracing::info;

use string_mcp::config::{DEFAULT_BASE_URL, DEFAULT_CALLER_IDENTITY, DEFAULT_VERSION_URL};
use string_mcp::{BridgeConfig, StringBridgeServer};

/// Command line arguments for the STRING MCP bridge
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// STRING API root used for the version endpoint
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Version-pinned STRING API root used for data and image endpoints
    #[arg(long, default_value = DEFAULT_VERSION_URL)]
    version_url: String,

    /// Identity reported to STRING with every request
    #[arg(long, default_value = DEFAULT_CALLER_IDENTITY)]
    caller_identity: String,

    /// Seconds to wait after every STRING request
    #[arg(long, default_value_t = 1.0)]
    request_delay: f64,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable verbose output (implies debug)
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn into_config(self) -> Result<BridgeConfig, Box<dyn std::error::Error>> {
        let request_delay = Duration::try_from_secs_f64(self.request_delay)
            .map_err(|e| format!("invalid --request-delay {}: {}", self.request_delay, e))?;

        Ok(BridgeConfig {
            base_url: self.base_url.trim_end_matches('/').to_string(),
            version_url: self.version_url.trim_end_matches('/').to_string(),
            caller_identity: self.caller_identity,
            request_delay,
            timeout: Duration::from_secs(self.timeout),
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Set up logging based on command line flags
    let log_level = if args.verbose {
        "debug"
    } else if args.debug {
        "info"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(format!("string_mcp={}", log_level))
        .with_writer(std::io::stderr) // Send logs to stderr, not stdout
        .init();

    info!("Starting STRING MCP bridge");

    let config = args.into_config()?;
    let server = StringBridgeServer::new(config)?;

    // Run the MCP server - this will handle JSON-RPC communication over stdin/stdout
    server.run().await?;

    info!("STRING MCP bridge shutdown complete");
    Ok(())
}
