//! Archive manifest: member filename to SHA-1 content digest.
//!
//! Wallet clients verify every member of a pass bundle against this manifest
//! before trusting the signature, so it must be computed over the exact bytes
//! that end up in the archive, after every other member is finalized. The
//! manifest and the signature are never listed in the manifest itself.

use std::collections::BTreeMap;

use sha1::{Digest, Sha1};

use super::errors::PassBuildError;

/// Archive member name for the serialized manifest.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Archive member name for the detached signature over the manifest.
pub const SIGNATURE_FILE: &str = "signature";

/// Mapping from archive member filename to SHA-1 hex digest.
///
/// Backed by a `BTreeMap` so serialization order is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    entries: BTreeMap<String, String>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Digest `content` and record it under `filename`.
    pub fn add(&mut self, filename: &str, content: &[u8]) {
        self.entries.insert(filename.to_string(), digest(content));
    }

    /// Hex digest recorded for `filename`, if any.
    pub fn get(&self, filename: &str) -> Option<&str> {
        self.entries.get(filename).map(String::as_str)
    }

    /// Check that `content` matches the digest recorded for `filename`.
    pub fn verify(&self, filename: &str, content: &[u8]) -> bool {
        self.get(filename) == Some(digest(content).as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize as the JSON object Wallet expects.
    pub fn to_json(&self) -> Result<Vec<u8>, PassBuildError> {
        serde_json::to_vec(&self.entries)
            .map_err(|e| PassBuildError::packaging(format!("failed to serialize manifest: {e}")))
    }
}

/// SHA-1 hex digest of a byte slice.
pub fn digest(content: &[u8]) -> String {
    let mut hasher = Sha1::new();
    hasher.update(content);
    hex::encode(hasher.finalize())
}
