/// Runtime configuration for the STRING bridge
///
/// The configuration is assembled once at startup (from command line flags
/// in `main.rs`) and handed to the HTTP client. It is never mutated afterwards.

use std::time::Duration;

/// Default STRING API host, always serving the latest release
pub const DEFAULT_BASE_URL: &str = "https://string-db.org/api";

/// Version-pinned STRING API host
pub const DEFAULT_VERSION_URL: &str = "https://version-12-0.string-db.org/api";

/// Identity reported to STRING on every request
pub const DEFAULT_CALLER_IDENTITY: &str = "string_mcp_bridge";

/// Immutable per-process bridge configuration
#[derive(Debug, Clone, PartialEq)]
pub struct BridgeConfig {
    /// Host used for the version endpoint
    pub base_url: String,
    /// Host used for all data and image endpoints
    pub version_url: String,
    /// Value of the `caller_identity` query parameter
    pub caller_identity: String,
    /// Pause after every completed request
    pub request_delay: Duration,
    /// Ceiling for a single outbound request
    pub timeout: Duration,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            version_url: DEFAULT_VERSION_URL.to_string(),
            caller_identity: DEFAULT_CALLER_IDENTITY.to_string(),
            request_delay: Duration::from_secs(1),
            timeout: Duration::from_secs(30),
        }
    }
}

impl BridgeConfig {
    /// Point both hosts at the same URL (useful for tests and mirrors)
    pub fn with_host(mut self, url: &str) -> Self {
        let url = url.trim_end_matches('/').to_string();
        self.base_url = url.clone();
        self.version_url = url;
        self
    }

    /// Override the inter-request delay
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.request_delay = delay;
        self
    }
}
