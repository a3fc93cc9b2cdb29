//! The fetch orchestrator.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use hyphae_core::{Blob, ContentRef};
use hyphae_gateway::{GatewayConfig, GatewayFetcher};
use hyphae_storage::DynBlobStore;

use crate::content_cache::MemoryContentCache;

/// The single entry point external consumers fetch content through.
///
/// Owns the calls into the normalizer, both caches, and the gateway fetcher;
/// the fetcher never consults the caches, and nothing here talks to the
/// network directly. Constructed once at application start with an
/// explicitly chosen store backend, then shared by handle.
pub struct ContentClient {
    store: DynBlobStore,
    fetcher: GatewayFetcher,
    content_cache: MemoryContentCache,
}

impl ContentClient {
    /// Creates a client over the given store and gateway configuration.
    #[must_use]
    pub fn new(store: DynBlobStore, config: GatewayConfig) -> Self {
        tracing::debug!(backend = store.backend_name(), "content client ready");
        Self {
            store,
            fetcher: GatewayFetcher::new(config),
            content_cache: MemoryContentCache::new(),
        }
    }

    /// Returns the blob store handle.
    #[must_use]
    pub fn store(&self) -> &DynBlobStore {
        &self.store
    }

    /// Returns the transient content cache.
    #[must_use]
    pub fn content_cache(&self) -> &MemoryContentCache {
        &self.content_cache
    }

    /// Returns the ordered request-URL candidates for an input.
    ///
    /// A direct URL yields itself, empty input yields nothing, and a CID
    /// expands to the full gateway list in attempt order, identical to what
    /// [`fetch_with_cache`](Self::fetch_with_cache) would try.
    #[must_use]
    pub fn candidate_urls(&self, input: &str) -> Vec<String> {
        match ContentRef::parse(input) {
            ContentRef::Empty => Vec::new(),
            ContentRef::Url(url) => vec![url],
            ContentRef::Cid(cid) => self.fetcher.candidate_urls(&cid),
        }
    }

    /// Fetches content by CID or direct URL, serving repeat CID reads from
    /// the local store.
    ///
    /// - Empty input returns `None` immediately; nothing is contacted.
    /// - A direct URL is fetched once, bypassing both caches entirely.
    /// - A CID is looked up in the blob store first; a hit short-circuits
    ///   the network. On a miss the gateway fallback chain runs, and a
    ///   successful fetch is persisted in a detached background task the
    ///   caller never waits on.
    ///
    /// Every expected failure mode resolves to `None`.
    pub async fn fetch_with_cache(&self, input: &str) -> Option<Blob> {
        match ContentRef::parse(input) {
            ContentRef::Empty => {
                tracing::trace!("empty content reference");
                None
            }
            ContentRef::Url(url) => self.fetcher.fetch_direct(&url).await,
            ContentRef::Cid(cid) => {
                match self.store.get(&cid).await {
                    Ok(Some(stored)) => {
                        tracing::trace!(%cid, "blob store hit");
                        return Some(stored.into_blob());
                    }
                    Ok(None) => {}
                    Err(e) => {
                        // A failing store degrades to a cache miss; the
                        // network path still runs.
                        tracing::warn!(
                            %cid,
                            error = %e,
                            category = %e.category(),
                            "blob store read failed, treating as miss"
                        );
                    }
                }

                let blob = self.fetcher.fetch_with_fallback(&cid).await?;
                self.persist_detached(cid, blob.clone());
                Some(blob)
            }
        }
    }

    /// Fetches content and decodes it as UTF-8 text, caching the result in
    /// the transient content cache for `ttl`.
    pub async fn fetch_text(&self, input: &str, ttl: Duration) -> Option<String> {
        let key = format!("text:{input}");
        if let Some(Value::String(text)) = self.content_cache.get(&key) {
            return Some(text);
        }

        let blob = self.fetch_with_cache(input).await?;
        let text = blob.text().into_owned();
        self.content_cache
            .set(key, Value::String(text.clone()), ttl);
        Some(text)
    }

    /// Fetches content and parses it as JSON, caching the parsed value in
    /// the transient content cache for `ttl`.
    ///
    /// A payload that is not valid JSON resolves to `None` and is not cached.
    pub async fn fetch_json(&self, input: &str, ttl: Duration) -> Option<Value> {
        let key = format!("json:{input}");
        if let Some(value) = self.content_cache.get(&key) {
            return Some(value);
        }

        let blob = self.fetch_with_cache(input).await?;
        match blob.json() {
            Ok(value) => {
                self.content_cache.set(key, value.clone(), ttl);
                Some(value)
            }
            Err(e) => {
                tracing::warn!(%input, error = %e, "fetched content is not valid JSON");
                None
            }
        }
    }

    /// Writes a fetched blob to the store without blocking the caller.
    ///
    /// Failures are logged and never surfaced; the caller already holds the
    /// blob.
    fn persist_detached(&self, cid: String, blob: Blob) {
        let store = Arc::clone(&self.store);
        tokio::spawn(async move {
            if let Err(e) = store.put(&cid, &blob).await {
                tracing::warn!(
                    %cid,
                    error = %e,
                    category = %e.category(),
                    "background persist failed"
                );
            } else {
                tracing::debug!(%cid, "blob persisted in background");
            }
        });
    }
}
