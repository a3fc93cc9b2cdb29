//! Backend selection and construction.
//!
//! The durable backend is an explicit capability chosen once at application
//! start: client-capable runtimes open the LMDB store, everything else gets
//! the inert null store. Orchestration code holds the resulting
//! [`DynBlobStore`] and never re-probes the environment.

use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use hyphae_storage::{DynBlobStore, NullBlobStore, StorageError};

use crate::store::{LmdbBlobStore, LmdbStoreOptions};

/// Supported blob store backend types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Durable LMDB store on the local filesystem.
    Lmdb,
    /// Inert store for runtimes without a durable backend.
    Null,
}

/// Factory configuration to construct a blob store instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub backend: BackendKind,
    /// Directory for the LMDB environment. Required for [`BackendKind::Lmdb`].
    pub path: Option<PathBuf>,
    pub options: LmdbStoreOptions,
}

impl StoreConfig {
    /// Configuration for a durable LMDB store at the given directory.
    #[must_use]
    pub fn lmdb(path: impl Into<PathBuf>) -> Self {
        Self {
            backend: BackendKind::Lmdb,
            path: Some(path.into()),
            options: LmdbStoreOptions::default(),
        }
    }

    /// Configuration for the inert null store.
    #[must_use]
    pub fn null() -> Self {
        Self {
            backend: BackendKind::Null,
            path: None,
            options: LmdbStoreOptions::default(),
        }
    }

    /// Overrides the LMDB store options.
    #[must_use]
    pub fn with_options(mut self, options: LmdbStoreOptions) -> Self {
        self.options = options;
        self
    }
}

/// Creates a blob store instance based on the provided configuration.
///
/// # Errors
///
/// Returns an error if the LMDB backend is selected without a path, or the
/// environment cannot be opened. This is the one place where a storage
/// failure is surfaced instead of degraded: a misconfigured backend is a
/// startup error, not a steady-state fetch outcome.
pub fn open_store(config: &StoreConfig) -> Result<DynBlobStore, StorageError> {
    match config.backend {
        BackendKind::Lmdb => {
            let path = config
                .path
                .as_ref()
                .ok_or_else(|| StorageError::backend("lmdb backend requires a path"))?;
            let store = LmdbBlobStore::open(path, config.options.clone())?;
            Ok(Arc::new(store))
        }
        BackendKind::Null => Ok(Arc::new(NullBlobStore::new())),
    }
}
