//! Sequential-fallback gateway fetcher.

use tokio_util::sync::CancellationToken;

use hyphae_core::Blob;

use crate::config::GatewayConfig;
use crate::endpoint::candidate_urls;
use crate::error::FetchError;

/// Fetches a CID's bytes by trying a fixed, ordered endpoint list.
///
/// Attempts are strictly sequential in configured order. Any outcome other
/// than a clean success (timeout, transport error, non-2xx status) means
/// "try the next endpoint"; there is no special-casing by failure type. The
/// first success wins and no further endpoints are tried. Exhausting the
/// list is a normal outcome and yields `None`.
///
/// The fetcher never consults any cache; cache lookups belong to the
/// orchestrator above it.
pub struct GatewayFetcher {
    /// HTTP client carrying the per-attempt timeout.
    http: reqwest::Client,
    config: GatewayConfig,
}

impl GatewayFetcher {
    /// Creates a fetcher with the given configuration.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be created (should not happen in
    /// practice).
    #[must_use]
    pub fn new(config: GatewayConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { http, config }
    }

    /// Creates a fetcher with the reference deployment configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(GatewayConfig::default())
    }

    /// Returns the configured endpoint list.
    #[must_use]
    pub fn endpoints(&self) -> &[crate::endpoint::GatewayEndpoint] {
        &self.config.endpoints
    }

    /// Expands the configured endpoint list into request URLs for a CID.
    ///
    /// Same list, same order as [`fetch_with_fallback`](Self::fetch_with_fallback)
    /// attempts; the two surfaces cannot diverge because both walk the
    /// fetcher's own configuration.
    #[must_use]
    pub fn candidate_urls(&self, cid: &str) -> Vec<String> {
        candidate_urls(&self.config.endpoints, cid)
    }

    /// Fetches a CID through the gateway list, in order, stopping at the
    /// first success. Returns `None` when every endpoint fails.
    pub async fn fetch_with_fallback(&self, cid: &str) -> Option<Blob> {
        self.fetch_with_fallback_cancellable(cid, &CancellationToken::new())
            .await
    }

    /// Like [`fetch_with_fallback`](Self::fetch_with_fallback), but aborts
    /// the remaining fallback chain when `cancel` fires. Attempts remain
    /// strictly sequential; the token only cuts the chain short.
    pub async fn fetch_with_fallback_cancellable(
        &self,
        cid: &str,
        cancel: &CancellationToken,
    ) -> Option<Blob> {
        for endpoint in &self.config.endpoints {
            if cancel.is_cancelled() {
                tracing::debug!(%cid, "fetch cancelled before {}", endpoint.name());
                return None;
            }

            let url = endpoint.url_for(cid);
            tracing::debug!(%cid, gateway = endpoint.name(), %url, "gateway attempt");

            let attempt = self.try_url(&url);
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::debug!(%cid, "fetch cancelled during {}", endpoint.name());
                    return None;
                }
                result = attempt => match result {
                    Ok(blob) => {
                        tracing::debug!(
                            %cid,
                            gateway = endpoint.name(),
                            len = blob.len(),
                            "gateway success"
                        );
                        return Some(blob);
                    }
                    Err(e) => {
                        tracing::warn!(%cid, gateway = endpoint.name(), error = %e, "gateway attempt failed");
                    }
                }
            }
        }

        tracing::warn!(%cid, "all gateways exhausted");
        None
    }

    /// Fetches a direct URL with the same single-attempt timeout discipline,
    /// but no fallback list and no retry.
    pub async fn fetch_direct(&self, url: &str) -> Option<Blob> {
        match self.try_url(url).await {
            Ok(blob) => Some(blob),
            Err(e) => {
                tracing::warn!(%url, error = %e, "direct fetch failed");
                None
            }
        }
    }

    /// One GET attempt against one URL, expecting a binary body.
    async fn try_url(&self, url: &str) -> Result<Blob, FetchError> {
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let bytes = response.bytes().await?;

        Ok(Blob::from_parts(bytes, content_type))
    }
}
