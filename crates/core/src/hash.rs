//! Integrity hashing of canonical snapshots.
//!
//! The hash is a fingerprint for history-integrity verification, not a
//! chained or Merkle structure: equal snapshots always yield equal
//! digests, and any single field change yields a different digest.

use sha2::{Digest, Sha256};

use crate::error::{Error, Result};
use crate::snapshot::Snapshot;

/// Compute the SHA-256 digest of a canonical snapshot, rendered as
/// lowercase hex.
///
/// The snapshot's `BTreeMap` ordering makes the JSON serialization
/// stable, so the digest is a pure function of snapshot content.
pub fn integrity_hash(snapshot: &Snapshot) -> Result<String> {
    let payload = serde_json::to_vec(snapshot)
        .map_err(|e| Error::Internal(format!("snapshot serialization failed: {}", e)))?;
    let digest = Sha256::digest(&payload);
    Ok(hex::encode(digest))
}
