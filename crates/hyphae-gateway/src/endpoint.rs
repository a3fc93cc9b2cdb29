//! Gateway endpoints and the candidate-URL builder.

use serde::{Deserialize, Serialize};

/// One network location able to resolve a CID.
///
/// Static configuration: endpoints are built once and never mutated at
/// runtime. The request URL is the base URL with the CID appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayEndpoint {
    name: String,
    base_url: String,
}

impl GatewayEndpoint {
    /// Creates an endpoint. `base_url` should end with the path prefix the
    /// CID is appended to (e.g. `https://ipfs.io/ipfs/`).
    #[must_use]
    pub fn new(name: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_url: base_url.into(),
        }
    }

    /// Returns the endpoint name used in logs.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds the request URL for a CID.
    #[must_use]
    pub fn url_for(&self, cid: &str) -> String {
        format!("{}{}", self.base_url, cid)
    }
}

/// The reference deployment's gateway list, in priority order.
#[must_use]
pub fn default_endpoints() -> Vec<GatewayEndpoint> {
    vec![
        GatewayEndpoint::new("web3-storage", "https://w3s.link/ipfs/"),
        GatewayEndpoint::new("cloudflare", "https://cloudflare-ipfs.com/ipfs/"),
        GatewayEndpoint::new("pinata", "https://gateway.pinata.cloud/ipfs/"),
        GatewayEndpoint::new("ipfs-io", "https://ipfs.io/ipfs/"),
    ]
}

/// Expands an endpoint list into request URLs for a CID, preserving order.
///
/// This is the progressive-fallback surface for consumers that want the URL
/// list itself (e.g. successive `src` values on an image tag) instead of a
/// fetched blob. It must stay consistent with the fetcher's attempt order,
/// which is why both walk the same endpoint slice.
#[must_use]
pub fn candidate_urls(endpoints: &[GatewayEndpoint], cid: &str) -> Vec<String> {
    endpoints.iter().map(|e| e.url_for(cid)).collect()
}
