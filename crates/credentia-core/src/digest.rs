//! # Content Digest — File Integrity Fingerprints
//!
//! Defines [`ContentDigest`] and [`DigestAlgorithm`] for certificate file
//! integrity. A certificate record stores the digest of the exact bytes
//! that were uploaded, computed *before* the bytes reach the blob store,
//! so the record attests to what the school submitted rather than to what
//! the storage layer happened to keep.
//!
//! Digests are an integrity reference, not a dedup key: uploading the same
//! bytes twice produces two records with equal digests and distinct
//! identifiers.
//!
//! ## Wire Format
//!
//! Digests serialize as self-describing strings: `sha256:<64 lowercase hex>`.
//! The algorithm tag allows forward migration without re-reading every
//! stored blob.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::str::FromStr;

use crate::error::CoreError;

/// The hash algorithm used to produce a content digest.
///
/// SHA-256 is the only algorithm in use; the tag exists so stored digests
/// remain self-describing if the algorithm is ever rotated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DigestAlgorithm {
    /// SHA-256 — standard fixed-length content fingerprint.
    Sha256,
}

impl DigestAlgorithm {
    /// Returns the algorithm identifier string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
        }
    }
}

impl std::fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A content digest with its algorithm tag.
///
/// Produced from raw file bytes via [`sha256_digest()`]. The 32-byte digest
/// and algorithm tag together form a self-describing integrity reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentDigest {
    /// The hash algorithm that produced this digest.
    pub algorithm: DigestAlgorithm,
    /// The raw 32-byte digest value.
    pub bytes: [u8; 32],
}

impl ContentDigest {
    /// Create a content digest from raw bytes and algorithm.
    ///
    /// Prefer [`sha256_digest()`] for computing digests from file bytes.
    pub fn new(algorithm: DigestAlgorithm, bytes: [u8; 32]) -> Self {
        Self { algorithm, bytes }
    }

    /// Render the digest value as a lowercase hex string (64 chars).
    pub fn to_hex(&self) -> String {
        self.bytes.iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl std::fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.algorithm, self.to_hex())
    }
}

impl FromStr for ContentDigest {
    type Err = CoreError;

    /// Parse a `sha256:<64 hex>` string.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (algo, hex) = s
            .split_once(':')
            .ok_or_else(|| CoreError::DigestParse(format!("missing algorithm tag: {s:?}")))?;
        if algo != "sha256" {
            return Err(CoreError::DigestParse(format!(
                "unsupported algorithm: {algo:?}"
            )));
        }
        if hex.len() != 64 {
            return Err(CoreError::DigestParse(format!(
                "expected 64 hex chars, got {}",
                hex.len()
            )));
        }
        let mut bytes = [0u8; 32];
        for (i, chunk) in hex.as_bytes().chunks(2).enumerate() {
            let pair = std::str::from_utf8(chunk)
                .map_err(|_| CoreError::DigestParse("non-ascii hex".to_string()))?;
            bytes[i] = u8::from_str_radix(pair, 16)
                .map_err(|_| CoreError::DigestParse(format!("invalid hex pair: {pair:?}")))?;
        }
        Ok(Self::new(DigestAlgorithm::Sha256, bytes))
    }
}

// Serialize as the self-describing string form, not as a struct — this is
// the persisted representation on certificate records.
impl Serialize for ContentDigest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ContentDigest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(D::Error::custom)
    }
}

/// Compute a SHA-256 content digest over the exact input bytes.
///
/// This is the single digest computation path for certificate issuance.
/// It is called on the original upload bytes prior to storage — never
/// re-derived from the stored copy — so the resulting record attests to
/// integrity only if the storage layer preserves bytes in transit.
pub fn sha256_digest(data: &[u8]) -> ContentDigest {
    let hash = Sha256::digest(data);
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&hash);
    ContentDigest::new(DigestAlgorithm::Sha256, bytes)
}

/// Compute a SHA-256 hex string over the exact input bytes.
///
/// Convenience wrapper around [`sha256_digest()`] for contexts that only
/// need the hex form.
pub fn sha256_hex(data: &[u8]) -> String {
    sha256_digest(data).to_hex()
}
