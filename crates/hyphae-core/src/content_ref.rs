//! Classification of caller-supplied content identifiers.
//!
//! Callers hand the fetch layer a raw string that may be a bare CID, an
//! `ipfs://` URI, a direct HTTP(S) URL, or nothing at all. [`ContentRef::parse`]
//! sorts the input into one of those shapes exactly once per call; everything
//! downstream branches on the resulting variant instead of re-inspecting the
//! string.

/// A caller-supplied content identifier, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentRef {
    /// No identifier was given (empty or whitespace-only input).
    Empty,
    /// A direct HTTP(S) URL. Fetched as-is, never cached.
    Url(String),
    /// A content identifier resolvable through the gateway list.
    Cid(String),
}

impl ContentRef {
    /// Classifies an input string.
    ///
    /// Rules, applied in order:
    /// 1. empty or whitespace-only input is [`ContentRef::Empty`]
    /// 2. `http://` / `https://` prefixes are [`ContentRef::Url`], value unchanged
    /// 3. an `ipfs://` prefix is stripped, leaving a [`ContentRef::Cid`]
    /// 4. anything else is treated as a raw [`ContentRef::Cid`]
    ///
    /// Pure function: no I/O, no validation of the CID itself.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Self::Empty;
        }
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            return Self::Url(trimmed.to_string());
        }
        if let Some(cid) = trimmed.strip_prefix("ipfs://") {
            // "ipfs://" with nothing behind it carries no identifier
            if cid.is_empty() {
                return Self::Empty;
            }
            return Self::Cid(cid.to_string());
        }
        Self::Cid(trimmed.to_string())
    }

    /// Returns `true` if no identifier was given.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Returns the CID if this reference is one.
    #[must_use]
    pub fn as_cid(&self) -> Option<&str> {
        match self {
            Self::Cid(cid) => Some(cid),
            _ => None,
        }
    }

    /// Returns the URL if this reference is one.
    #[must_use]
    pub fn as_url(&self) -> Option<&str> {
        match self {
            Self::Url(url) => Some(url),
            _ => None,
        }
    }
}
