//! Snapshot and sidecar metadata types.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Version of the sidecar layout. Sidecars with another version are ignored.
pub const CACHE_FORMAT_VERSION: u32 = 1;

/// One immutable, timestamped copy of the serialized inventory.
///
/// The payload is opaque to the cache: it is stored and returned byte for
/// byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    data: Vec<u8>,
    created_at: i64,
}

impl Snapshot {
    /// Create a snapshot from a payload and its creation time (epoch seconds).
    pub fn new(data: impl Into<Vec<u8>>, created_at: i64) -> Self {
        Self {
            data: data.into(),
            created_at,
        }
    }

    /// The serialized inventory.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume the snapshot, returning its payload.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// When this snapshot was produced, in seconds since the epoch.
    pub fn created_at(&self) -> i64 {
        self.created_at
    }

    /// Seconds elapsed between creation and `now`. Negative if the snapshot
    /// claims to come from the future.
    pub fn age(&self, now: i64) -> i64 {
        now - self.created_at
    }
}

/// Sidecar record stored next to the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotMetadata {
    /// Sidecar layout version.
    pub format: u32,
    /// Creation time of the payload, epoch seconds.
    pub created_at: i64,
    /// Payload size in bytes.
    pub size_bytes: u64,
    /// Hex SHA-256 of the payload.
    pub sha256: String,
}

impl SnapshotMetadata {
    /// Describe a snapshot's payload.
    pub fn describe(snapshot: &Snapshot) -> Self {
        Self {
            format: CACHE_FORMAT_VERSION,
            created_at: snapshot.created_at,
            size_bytes: snapshot.data.len() as u64,
            sha256: digest(&snapshot.data),
        }
    }

    /// Check that `data` is the payload this sidecar was written for.
    pub fn matches(&self, data: &[u8]) -> bool {
        self.size_bytes == data.len() as u64 && self.sha256 == digest(data)
    }
}

fn digest(data: &[u8]) -> String {
    hex::encode(&Sha256::digest(data)[..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_accessors() {
        let snapshot = Snapshot::new(b"{}".to_vec(), 1_700_000_000);
        assert_eq!(snapshot.data(), b"{}");
        assert_eq!(snapshot.created_at(), 1_700_000_000);
        assert_eq!(snapshot.into_data(), b"{}".to_vec());
    }

    #[test]
    fn age_is_relative_to_now() {
        let snapshot = Snapshot::new("x", 1000);
        assert_eq!(snapshot.age(1010), 10);
        assert_eq!(snapshot.age(990), -10);
    }

    #[test]
    fn metadata_describes_payload() {
        let snapshot = Snapshot::new("hello", 5);
        let meta = SnapshotMetadata::describe(&snapshot);

        assert_eq!(meta.format, CACHE_FORMAT_VERSION);
        assert_eq!(meta.created_at, 5);
        assert_eq!(meta.size_bytes, 5);
        assert_eq!(
            meta.sha256,
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[test]
    fn metadata_rejects_other_payload() {
        let meta = SnapshotMetadata::describe(&Snapshot::new("hello", 5));

        assert!(meta.matches(b"hello"));
        assert!(!meta.matches(b"hellp"));
        assert!(!meta.matches(b"hello world"));
    }
}
