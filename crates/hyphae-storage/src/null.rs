//! Inert blob store for runtimes without a durable backend.

use async_trait::async_trait;

use hyphae_core::Blob;

use crate::error::StorageError;
use crate::traits::BlobStore;
use crate::types::StoredBlob;

/// A blob store that stores nothing.
///
/// Constructed at startup in execution contexts that lack a durable backend.
/// Every operation is a harmless no-op returning the empty value for its
/// type: reads miss, writes vanish, `list` is empty. Orchestration code runs
/// against it unchanged; only `is_available` reveals the difference.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullBlobStore;

impl NullBlobStore {
    /// Creates a new inert store.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl BlobStore for NullBlobStore {
    async fn get(&self, _cid: &str) -> Result<Option<StoredBlob>, StorageError> {
        Ok(None)
    }

    async fn put(&self, cid: &str, _blob: &Blob) -> Result<(), StorageError> {
        tracing::trace!("null store dropping write for {cid}");
        Ok(())
    }

    async fn delete(&self, _cid: &str) -> Result<(), StorageError> {
        Ok(())
    }

    async fn list(&self) -> Result<Vec<String>, StorageError> {
        Ok(Vec::new())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        Ok(())
    }

    fn is_available(&self) -> bool {
        false
    }

    fn backend_name(&self) -> &'static str {
        "null"
    }
}
