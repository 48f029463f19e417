//! Content Hash Value Object
//!
//! Promotion compares staged and live artifacts by content hash. A live
//! file that does not exist hashes to a sentinel that never equals a real
//! digest.

use std::fmt;

use serde::Serialize;
use sha2::{Digest, Sha256};

/// SHA-256 content hash, or the absent-file sentinel
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ContentHash(String);

impl ContentHash {
    /// Prefix for SHA-256 hashes
    pub const PREFIX: &'static str = "sha256:";

    /// Sentinel for a file that does not exist
    pub const ABSENT: &'static str = "absent";

    /// Hash raw bytes
    pub fn from_bytes(content: &[u8]) -> Self {
        Self(format!("{}{:x}", Self::PREFIX, Sha256::digest(content)))
    }

    /// Hash string content
    pub fn from_content(content: &str) -> Self {
        Self::from_bytes(content.as_bytes())
    }

    /// The absent-file sentinel
    pub fn absent() -> Self {
        Self(Self::ABSENT.to_string())
    }

    pub fn is_absent(&self) -> bool {
        self.0 == Self::ABSENT
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Hex digest without prefix (empty for the sentinel)
    pub fn hex(&self) -> &str {
        self.0.strip_prefix(Self::PREFIX).unwrap_or("")
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ContentHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
