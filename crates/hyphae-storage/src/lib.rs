//! # hyphae-storage
//!
//! Blob store abstraction layer for hyphae.
//!
//! This crate defines the traits and types that all blob store backends must
//! implement, plus the inert [`NullBlobStore`] used in runtimes without a
//! durable backend. The durable implementation lives in a separate crate.
//!
//! ## Overview
//!
//! The main trait is [`BlobStore`], which defines the contract for:
//! - Keyed blob access (get, put, delete) with CID keys
//! - Whole-store operations (list, clear)
//! - Availability probing (`is_available`)
//!
//! ## Degraded runtimes
//!
//! In an execution context without a durable backend, construct a
//! [`NullBlobStore`] at startup instead of probing the environment on every
//! call. All of its operations are harmless no-ops returning the empty value
//! for their type, so orchestration code runs identically either way.
//!
//! ## Example
//!
//! ```ignore
//! use hyphae_storage::{BlobStore, StoredBlob};
//!
//! async fn cached_bytes(store: &dyn BlobStore, cid: &str) -> Option<StoredBlob> {
//!     match store.get(cid).await {
//!         Ok(entry) => entry,
//!         Err(e) => {
//!             tracing::warn!("store read failed for {cid}: {e}");
//!             None
//!         }
//!     }
//! }
//! ```

mod error;
mod null;
mod traits;
mod types;

pub use error::{ErrorCategory, StorageError};
pub use null::NullBlobStore;
pub use traits::BlobStore;
pub use types::StoredBlob;

/// Type alias for a storage result.
pub type StorageResult<T> = Result<T, StorageError>;

/// Type alias for a shared blob store trait object.
pub type DynBlobStore = std::sync::Arc<dyn BlobStore>;

/// Prelude module for convenient imports.
///
/// ```ignore
/// use hyphae_storage::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{ErrorCategory, StorageError};
    pub use crate::null::NullBlobStore;
    pub use crate::traits::BlobStore;
    pub use crate::types::StoredBlob;
    pub use crate::{DynBlobStore, StorageResult};
}
