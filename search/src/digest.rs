//! Content hashing and canonical JSON bytes.
//!
//! Algorithm: SHA-256 with a null-terminated domain prefix. Canonical JSON
//! is compact `serde_json` output; `serde_json::Map` is a `BTreeMap` in this
//! workspace (no `preserve_order`), so object keys serialize sorted.

use sha2::{Digest, Sha256};

use crate::error::SearchError;

/// Domain prefix for search graph hashing.
pub const DOMAIN_SEARCH_GRAPH: &[u8] = b"WAYFINDER::SEARCH_GRAPH::V1\0";

/// A content-addressed hash with algorithm identifier.
///
/// Format: `"algorithm:hex_digest"` (e.g., `"sha256:abcdef..."`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentHash {
    full: String,
    colon: usize,
}

impl ContentHash {
    /// Parse from `"algorithm:hex"` format.
    ///
    /// Returns `None` for a missing colon, empty algorithm, or empty digest.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let colon = s.find(':')?;
        if colon == 0 || colon == s.len() - 1 {
            return None;
        }
        Some(Self {
            full: s.to_string(),
            colon,
        })
    }

    #[must_use]
    pub fn algorithm(&self) -> &str {
        &self.full[..self.colon]
    }

    #[must_use]
    pub fn hex_digest(&self) -> &str {
        &self.full[self.colon + 1..]
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.full
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.full)
    }
}

/// `sha256(domain || data)` as a [`ContentHash`].
#[must_use]
pub fn canonical_hash(domain: &[u8], data: &[u8]) -> ContentHash {
    let mut hasher = Sha256::new();
    hasher.update(domain);
    hasher.update(data);
    let digest = hex::encode(hasher.finalize());
    ContentHash {
        colon: "sha256".len(),
        full: format!("sha256:{digest}"),
    }
}

/// Compact, key-sorted JSON bytes for hashing.
///
/// # Errors
///
/// Returns [`SearchError::GraphSerialization`] if `serde_json` fails.
pub fn canonical_json_bytes(value: &serde_json::Value) -> Result<Vec<u8>, SearchError> {
    serde_json::to_vec(value).map_err(|e| SearchError::GraphSerialization {
        detail: e.to_string(),
    })
}

/// Bit-exact text form of a cost: the IEEE-754 bits as 16 hex digits.
#[must_use]
pub fn cost_bits_hex(cost: f64) -> String {
    format!("{:016x}", cost.to_bits())
}
