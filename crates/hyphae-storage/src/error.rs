//! Storage error types for the blob store abstraction layer.

use std::fmt;

/// Errors that can occur during blob store operations.
///
/// These never cross the consumer-facing fetch surface; the orchestrator
/// logs them and degrades to a cache miss.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Failed to open or connect to the storage backend.
    #[error("Backend error: {message}")]
    Backend {
        /// Description of the backend failure.
        message: String,
    },

    /// An error occurred during a storage transaction.
    #[error("Transaction error: {message}")]
    Transaction {
        /// Description of the transaction error.
        message: String,
    },

    /// A stored record could not be decoded.
    #[error("Corrupt record for {cid}: {message}")]
    CorruptRecord {
        /// The CID whose record is corrupt.
        cid: String,
        /// Description of the decode failure.
        message: String,
    },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An internal storage error occurred.
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error.
        message: String,
    },
}

impl StorageError {
    /// Creates a new `Backend` error.
    #[must_use]
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }

    /// Creates a new `Transaction` error.
    #[must_use]
    pub fn transaction(message: impl Into<String>) -> Self {
        Self::Transaction {
            message: message.into(),
        }
    }

    /// Creates a new `CorruptRecord` error.
    #[must_use]
    pub fn corrupt_record(cid: impl Into<String>, message: impl Into<String>) -> Self {
        Self::CorruptRecord {
            cid: cid.into(),
            message: message.into(),
        }
    }

    /// Creates a new `Internal` error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns the error category for logging/monitoring purposes.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Backend { .. } => ErrorCategory::Infrastructure,
            Self::Transaction { .. } => ErrorCategory::Transaction,
            Self::CorruptRecord { .. } => ErrorCategory::Corruption,
            Self::Io(_) => ErrorCategory::Infrastructure,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// Categories of storage errors for logging and monitoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Infrastructure/connection error.
    Infrastructure,
    /// Transaction-related error.
    Transaction,
    /// A stored record failed to decode.
    Corruption,
    /// Internal error.
    Internal,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Infrastructure => write!(f, "infrastructure"),
            Self::Transaction => write!(f, "transaction"),
            Self::Corruption => write!(f, "corruption"),
            Self::Internal => write!(f, "internal"),
        }
    }
}
