//! Fetcher configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::endpoint::{GatewayEndpoint, default_endpoints};

/// Per-attempt timeout used by the reference deployment.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_millis(8000);

/// Configuration for the gateway fetcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Ordered endpoint list. Attempt order follows list order exactly.
    pub endpoints: Vec<GatewayEndpoint>,

    /// Timeout applied to every individual request (default: 8000 ms).
    pub request_timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            endpoints: default_endpoints(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl GatewayConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the endpoint list. Order is preserved as given.
    #[must_use]
    pub fn with_endpoints(mut self, endpoints: Vec<GatewayEndpoint>) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Sets the per-attempt request timeout.
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}
