//! Inventory snapshot cache.
//!
//! This module persists the last computed inventory between invocations and
//! decides whether it is still young enough to serve.

pub mod clock;
pub mod snapshot;
pub mod store;
pub mod validation;

pub use clock::{Clock, FixedClock, SystemClock};
pub use snapshot::{Snapshot, SnapshotMetadata, CACHE_FORMAT_VERSION};
pub use store::CacheStore;
pub use validation::{format_duration, parse_ttl, validate, ValidationResult};

/// Default payload location, matching the historical script.
pub const DEFAULT_CACHE_PATH: &str = "/tmp/ansible-vsphere-inventory-cache.tmp";

/// Default TTL in seconds.
pub const DEFAULT_CACHE_TTL: u64 = 7200;
