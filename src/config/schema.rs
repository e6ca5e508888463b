//! Configuration schema definitions.
//!
//! These structs map to the YAML configuration file. Every field has a
//! default, so an empty or missing file is a valid configuration.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::cache::{parse_ttl, DEFAULT_CACHE_PATH, DEFAULT_CACHE_TTL};
use crate::inventory::{GroupBy, InventoryFilter, Shaping};

/// Root configuration structure for vsphere-inventory.yml
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    /// Snapshot cache settings
    pub cache: CacheSettings,

    /// Connection to vCenter
    pub vsphere: VsphereSettings,

    /// Record filters
    pub filters: InventoryFilter,

    /// Inventory layout
    pub inventory: InventorySettings,
}

impl InventoryConfig {
    /// Filtering and grouping options for the producer.
    pub fn shaping(&self) -> Shaping {
        Shaping {
            filter: self.filters.clone(),
            group_by: self.inventory.group_by,
        }
    }
}

/// Where the snapshot lives and how long it stays fresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    /// Payload path; the sidecar goes next to it.
    pub path: PathBuf,

    /// Seconds a snapshot stays fresh. Accepts "2h"-style strings. 0 disables.
    #[serde(deserialize_with = "deserialize_ttl")]
    pub ttl: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_CACHE_PATH),
            ttl: DEFAULT_CACHE_TTL,
        }
    }
}

/// vCenter connection settings.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VsphereSettings {
    /// Host name, or a full base URL such as `https://vcenter:8443`.
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    /// Verify the server certificate.
    pub verify_ssl: bool,
    /// Per-request timeout in seconds.
    pub timeout: u64,
}

impl Default for VsphereSettings {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: 443,
            username: String::new(),
            password: String::new(),
            verify_ssl: false,
            timeout: 30,
        }
    }
}

impl VsphereSettings {
    /// Base URL for REST calls.
    pub fn base_url(&self) -> String {
        if self.host.contains("://") {
            self.host.trim_end_matches('/').to_string()
        } else {
            format!("https://{}:{}", self.host, self.port)
        }
    }
}

impl fmt::Debug for VsphereSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let password = if self.password.is_empty() {
            ""
        } else {
            "********"
        };
        f.debug_struct("VsphereSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &password)
            .field("verify_ssl", &self.verify_ssl)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Inventory layout settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventorySettings {
    /// Attribute hosts are grouped by
    pub group_by: GroupBy,
}

fn deserialize_ttl<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawTtl {
        Seconds(u64),
        Text(String),
    }

    match RawTtl::deserialize(deserializer)? {
        RawTtl::Seconds(secs) => Ok(secs),
        RawTtl::Text(text) => parse_ttl(&text).map_err(serde::de::Error::custom),
    }
}
