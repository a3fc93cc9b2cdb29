//! # hyphae-gateway
//!
//! Gateway resolution for content-addressed blobs.
//!
//! A CID can be resolved by any of several public gateways. This crate holds
//! the ordered endpoint list and the [`GatewayFetcher`], which tries each
//! endpoint strictly in order with a fixed per-attempt timeout and returns
//! the first successful body. Endpoint order is part of the contract:
//! consumers that do their own progressive fallback (an image tag walking
//! `src` candidates) use [`candidate_urls`] and see the exact same list.
//!
//! Fallback is deliberately sequential. Racing the endpoints would change
//! observable behavior (attempt counts, which gateway served the bytes) and
//! is a contract change, not an optimization.

mod config;
mod endpoint;
mod error;
mod fetcher;

pub use config::{DEFAULT_REQUEST_TIMEOUT, GatewayConfig};
pub use endpoint::{GatewayEndpoint, candidate_urls, default_endpoints};
pub use error::FetchError;
pub use fetcher::GatewayFetcher;
