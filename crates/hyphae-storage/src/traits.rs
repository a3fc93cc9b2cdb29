//! Storage traits for the blob store abstraction layer.

use async_trait::async_trait;

use hyphae_core::Blob;

use crate::error::StorageError;
use crate::types::StoredBlob;

/// The main storage trait that all blob store backends must implement.
///
/// Keys are CID strings; values are immutable blobs. Implementations must be
/// thread-safe (`Send + Sync`) and safe under concurrent writers: writes to
/// different keys are independent, and writes to the same key are
/// last-write-wins (content-addressed keys mean concurrent writers never
/// disagree on the payload).
///
/// # Example
///
/// ```ignore
/// use hyphae_storage::{BlobStore, StorageError, StoredBlob};
///
/// async fn stored_len(store: &dyn BlobStore, cid: &str) -> Result<usize, StorageError> {
///     Ok(store
///         .get(cid)
///         .await?
///         .map(|entry| entry.blob.len())
///         .unwrap_or(0))
/// }
/// ```
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Reads the blob stored under a CID.
    ///
    /// Returns `None` if no record exists.
    ///
    /// # Errors
    ///
    /// Returns an error only for infrastructure issues, not for missing
    /// records.
    async fn get(&self, cid: &str) -> Result<Option<StoredBlob>, StorageError>;

    /// Stores a blob under a CID.
    ///
    /// A record already present under the key is fully replaced, including
    /// its content type and stored-at time.
    ///
    /// # Errors
    ///
    /// Returns an error if the write transaction fails.
    async fn put(&self, cid: &str, blob: &Blob) -> Result<(), StorageError>;

    /// Deletes the record stored under a CID.
    ///
    /// Deleting an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the write transaction fails.
    async fn delete(&self, cid: &str) -> Result<(), StorageError>;

    /// Lists every CID with a stored record.
    ///
    /// # Errors
    ///
    /// Returns an error if the read transaction fails.
    async fn list(&self) -> Result<Vec<String>, StorageError>;

    /// Removes every stored record.
    ///
    /// # Errors
    ///
    /// Returns an error if the write transaction fails.
    async fn clear(&self) -> Result<(), StorageError>;

    /// Returns whether this backend can durably store blobs.
    ///
    /// The null backend reports `false`; callers may use this to skip
    /// pointless writes, but every operation is safe to call either way.
    fn is_available(&self) -> bool;

    /// Returns the name of this storage backend for logging/debugging.
    fn backend_name(&self) -> &'static str;
}
