//! LMDB-backed blob store implementation.
//!
//! Uses the heed crate (Rust bindings for LMDB) to provide a memory-mapped,
//! transactional key-value store for content-addressed blobs.
//!
//! # Record layout
//!
//! Each value is a framed record:
//!
//! ```text
//! [stored-at millis: 8 bytes LE][content-type len: 2 bytes LE][content-type][payload]
//! ```
//!
//! # Thread safety
//!
//! LMDB provides ACID transactions. The store uses read transactions for
//! `get` and `list`, write transactions for `put`, `delete`, and `clear`.
//! Concurrent writes to the same CID are last-write-wins; keys are
//! content-addressed, so concurrent writers never disagree on the payload.

use std::path::Path;

use async_trait::async_trait;
use bytes::Bytes;
use heed::types::{Bytes as HeedBytes, Str};
use heed::{Database, Env, EnvOpenOptions};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use hyphae_core::Blob;
use hyphae_storage::{BlobStore, StorageError, StoredBlob};

/// Number of bytes in the fixed record header (stored-at + content-type length).
const RECORD_HEADER_LEN: usize = 8 + 2;

/// Options for opening an LMDB blob store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LmdbStoreOptions {
    /// Maximum size of the memory map in megabytes (default: 512).
    pub map_size_mb: usize,
}

impl Default for LmdbStoreOptions {
    fn default() -> Self {
        Self { map_size_mb: 512 }
    }
}

impl LmdbStoreOptions {
    /// Creates options with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum memory map size in megabytes.
    #[must_use]
    pub fn with_map_size_mb(mut self, map_size_mb: usize) -> Self {
        self.map_size_mb = map_size_mb;
        self
    }
}

/// Durable blob store on LMDB.
///
/// # Example
///
/// ```ignore
/// use hyphae_db_lmdb::{LmdbBlobStore, LmdbStoreOptions};
/// use hyphae_core::Blob;
///
/// let store = LmdbBlobStore::open("/var/lib/hyphae/blobs", LmdbStoreOptions::default())?;
/// store.put("QmFoo", &Blob::new(payload)).await?;
/// let cached = store.get("QmFoo").await?;
/// ```
pub struct LmdbBlobStore {
    /// The LMDB environment.
    env: Env,
    /// The main database (single unnamed database).
    db: Database<Str, HeedBytes>,
}

impl LmdbBlobStore {
    /// Opens (creating if necessary) an LMDB blob store at the given directory.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The directory cannot be created
    /// - The LMDB environment cannot be opened
    /// - The database cannot be created
    pub fn open<P: AsRef<Path>>(path: P, options: LmdbStoreOptions) -> Result<Self, StorageError> {
        std::fs::create_dir_all(&path)?;

        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(options.map_size_mb * 1024 * 1024)
                .max_dbs(1)
                .open(path.as_ref())
        }
        .map_err(|e| StorageError::backend(e.to_string()))?;

        let mut wtxn = env
            .write_txn()
            .map_err(|e| StorageError::transaction(e.to_string()))?;

        let db: Database<Str, HeedBytes> = env
            .create_database(&mut wtxn, None)
            .map_err(|e| StorageError::backend(e.to_string()))?;

        wtxn.commit()
            .map_err(|e| StorageError::transaction(e.to_string()))?;

        tracing::debug!(path = %path.as_ref().display(), "opened lmdb blob store");

        Ok(Self { env, db })
    }

    fn encode_record(blob: &Blob, stored_at: OffsetDateTime) -> Vec<u8> {
        let content_type = blob.content_type().unwrap_or("");
        let millis = (stored_at.unix_timestamp_nanos() / 1_000_000) as i64;

        let mut out = Vec::with_capacity(RECORD_HEADER_LEN + content_type.len() + blob.len());
        out.extend_from_slice(&millis.to_le_bytes());
        out.extend_from_slice(&(content_type.len() as u16).to_le_bytes());
        out.extend_from_slice(content_type.as_bytes());
        out.extend_from_slice(blob.bytes());
        out
    }

    fn decode_record(cid: &str, raw: &[u8]) -> Result<StoredBlob, StorageError> {
        if raw.len() < RECORD_HEADER_LEN {
            return Err(StorageError::corrupt_record(cid, "truncated header"));
        }

        let millis_bytes: [u8; 8] = raw[0..8]
            .try_into()
            .map_err(|_| StorageError::corrupt_record(cid, "invalid timestamp"))?;
        let millis = i64::from_le_bytes(millis_bytes);
        let stored_at = OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * 1_000_000)
            .map_err(|e| StorageError::corrupt_record(cid, e.to_string()))?;

        let ct_len_bytes: [u8; 2] = raw[8..10]
            .try_into()
            .map_err(|_| StorageError::corrupt_record(cid, "invalid content-type length"))?;
        let ct_len = u16::from_le_bytes(ct_len_bytes) as usize;

        if raw.len() < RECORD_HEADER_LEN + ct_len {
            return Err(StorageError::corrupt_record(cid, "truncated content type"));
        }

        let content_type = if ct_len == 0 {
            None
        } else {
            let ct = std::str::from_utf8(&raw[RECORD_HEADER_LEN..RECORD_HEADER_LEN + ct_len])
                .map_err(|e| StorageError::corrupt_record(cid, e.to_string()))?;
            Some(ct.to_string())
        };

        let payload = Bytes::copy_from_slice(&raw[RECORD_HEADER_LEN + ct_len..]);
        let blob = Blob::from_parts(payload, content_type);

        Ok(StoredBlob::with_stored_at(cid, blob, stored_at))
    }
}

#[async_trait]
impl BlobStore for LmdbBlobStore {
    async fn get(&self, cid: &str) -> Result<Option<StoredBlob>, StorageError> {
        let rtxn = self
            .env
            .read_txn()
            .map_err(|e| StorageError::transaction(e.to_string()))?;

        match self
            .db
            .get(&rtxn, cid)
            .map_err(|e| StorageError::transaction(e.to_string()))?
        {
            Some(raw) => {
                let stored = Self::decode_record(cid, raw)?;
                tracing::trace!(%cid, len = stored.blob.len(), "lmdb hit");
                Ok(Some(stored))
            }
            None => Ok(None),
        }
    }

    async fn put(&self, cid: &str, blob: &Blob) -> Result<(), StorageError> {
        let record = Self::encode_record(blob, OffsetDateTime::now_utc());

        let mut wtxn = self
            .env
            .write_txn()
            .map_err(|e| StorageError::transaction(e.to_string()))?;

        self.db
            .put(&mut wtxn, cid, &record)
            .map_err(|e| StorageError::transaction(e.to_string()))?;

        wtxn.commit()
            .map_err(|e| StorageError::transaction(e.to_string()))?;

        tracing::debug!(%cid, len = blob.len(), "stored blob");
        Ok(())
    }

    async fn delete(&self, cid: &str) -> Result<(), StorageError> {
        let mut wtxn = self
            .env
            .write_txn()
            .map_err(|e| StorageError::transaction(e.to_string()))?;

        // Returns false for an absent key, which is not an error.
        self.db
            .delete(&mut wtxn, cid)
            .map_err(|e| StorageError::transaction(e.to_string()))?;

        wtxn.commit()
            .map_err(|e| StorageError::transaction(e.to_string()))?;

        Ok(())
    }

    async fn list(&self) -> Result<Vec<String>, StorageError> {
        let rtxn = self
            .env
            .read_txn()
            .map_err(|e| StorageError::transaction(e.to_string()))?;

        let iter = self
            .db
            .iter(&rtxn)
            .map_err(|e| StorageError::transaction(e.to_string()))?;

        let mut cids = Vec::new();
        for result in iter {
            let (cid, _) = result.map_err(|e| StorageError::transaction(e.to_string()))?;
            cids.push(cid.to_string());
        }

        Ok(cids)
    }

    async fn clear(&self) -> Result<(), StorageError> {
        let mut wtxn = self
            .env
            .write_txn()
            .map_err(|e| StorageError::transaction(e.to_string()))?;

        self.db
            .clear(&mut wtxn)
            .map_err(|e| StorageError::transaction(e.to_string()))?;

        wtxn.commit()
            .map_err(|e| StorageError::transaction(e.to_string()))?;

        tracing::debug!("cleared blob store");
        Ok(())
    }

    fn is_available(&self) -> bool {
        true
    }

    fn backend_name(&self) -> &'static str {
        "lmdb"
    }
}
