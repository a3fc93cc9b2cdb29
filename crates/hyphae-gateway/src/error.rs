//! Per-attempt failure taxonomy.
//!
//! These errors never reach the public fetch surface: every failure mode
//! means "try the next endpoint" and is logged, not propagated. The variants
//! exist so logs can say what actually happened.

use thiserror::Error;

/// Why a single gateway attempt failed.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The attempt exceeded the per-request timeout.
    #[error("request timed out")]
    Timeout,

    /// A transport-level error occurred (DNS, connect, TLS, body read).
    #[error("transport error: {0}")]
    Transport(String),

    /// The gateway answered with a non-success status.
    #[error("unexpected status: {0}")]
    Status(u16),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else {
            Self::Transport(e.to_string())
        }
    }
}
