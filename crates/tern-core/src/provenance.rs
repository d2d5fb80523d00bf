//! Provenance and schema descriptors attached to serialized reports.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Semantic version describing the schema of serialized payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SchemaVersion {
    /// Major version incremented for breaking changes.
    pub major: u32,
    /// Minor version incremented for additive changes.
    pub minor: u32,
    /// Patch version incremented for bug fixes and documentation updates.
    pub patch: u32,
}

impl SchemaVersion {
    /// Creates a new schema version descriptor.
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl Default for SchemaVersion {
    fn default() -> Self {
        Self::new(1, 0, 0)
    }
}

/// Provenance information attached to every genus and Hecke report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ReportProvenance {
    /// SHA-256 of the canonical input description (form and prime symbols).
    pub input_hash: String,
    /// Master seed governing finite-field element search.
    pub seed: u64,
    /// Integer width the genus was computed with.
    pub precision: String,
    /// Version of the crate that produced the report.
    pub tool_version: String,
}

impl ReportProvenance {
    /// Builds a provenance record, hashing `input` with SHA-256.
    pub fn new(input: &[u8], seed: u64, precision: impl Into<String>) -> Self {
        Self {
            input_hash: content_hash(input),
            seed,
            precision: precision.into(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Hex encoded SHA-256 digest of `bytes`.
pub fn content_hash(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}
