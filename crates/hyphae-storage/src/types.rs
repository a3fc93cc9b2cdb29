//! Storage types for the blob store abstraction layer.

use hyphae_core::Blob;
use time::OffsetDateTime;

/// A blob as stored in a backend, keyed by CID.
///
/// A re-`put` under the same CID fully replaces the prior record. The same
/// CID always names the same bytes, so a replacement can only refresh
/// metadata, never change content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBlob {
    /// The content identifier this blob is stored under.
    pub cid: String,
    /// The payload and its content type.
    pub blob: Blob,
    /// When this record was written.
    pub stored_at: OffsetDateTime,
}

impl StoredBlob {
    /// Creates a new `StoredBlob` stamped with the current time.
    #[must_use]
    pub fn new(cid: impl Into<String>, blob: Blob) -> Self {
        Self {
            cid: cid.into(),
            blob,
            stored_at: OffsetDateTime::now_utc(),
        }
    }

    /// Creates a `StoredBlob` with an explicit stored-at time.
    ///
    /// Backends use this when decoding a persisted record.
    #[must_use]
    pub fn with_stored_at(cid: impl Into<String>, blob: Blob, stored_at: OffsetDateTime) -> Self {
        Self {
            cid: cid.into(),
            blob,
            stored_at,
        }
    }

    /// Consumes the record, returning the blob.
    #[must_use]
    pub fn into_blob(self) -> Blob {
        self.blob
    }
}
