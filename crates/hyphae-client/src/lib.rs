//! # hyphae-client
//!
//! The consumer-facing fetch surface.
//!
//! [`ContentClient`] composes the content-reference normalizer, the
//! persistent blob store, and the gateway fetcher into one call:
//!
//! ```text
//! normalize -> cache lookup -> sequential gateway fallback -> detached persist -> return
//! ```
//!
//! Every expected failure mode resolves to `None`: callers distinguish only
//! "got a blob" from "unavailable", never the underlying cause. The client is
//! stateless per call and safe to share behind an `Arc`; in-flight request
//! deduplication is deliberately left to the request-cache layer wrapping
//! this crate.
//!
//! ## Example
//!
//! ```ignore
//! use hyphae_client::ContentClient;
//! use hyphae_db_lmdb::{StoreConfig, open_store};
//! use hyphae_gateway::GatewayConfig;
//!
//! let store = open_store(&StoreConfig::lmdb("/var/lib/hyphae/blobs"))?;
//! let client = ContentClient::new(store, GatewayConfig::default());
//!
//! // First call walks the gateways; repeat calls are served locally.
//! let blob = client.fetch_with_cache("ipfs://QmFoo").await;
//! ```

mod client;
mod content_cache;

pub use client::ContentClient;
pub use content_cache::MemoryContentCache;

pub use hyphae_core::{Blob, ContentRef};
pub use hyphae_gateway::{GatewayConfig, GatewayEndpoint, GatewayFetcher};
pub use hyphae_storage::DynBlobStore;
