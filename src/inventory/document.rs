//! Ansible dynamic-inventory document.
//!
//! The document is a map from group name to host names plus a `_meta`
//! section carrying per-host variables, so Ansible never has to call
//! `--host` for each machine.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{PowerState, VmRecord};

/// Attribute used to form inventory groups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupBy {
    /// One group per connected network.
    #[default]
    Networks,
    /// One group per power state.
    PowerState,
    /// One group per guest id.
    GuestId,
}

impl GroupBy {
    fn keys(self, record: &VmRecord) -> Vec<String> {
        match self {
            GroupBy::Networks => record.networks.clone(),
            GroupBy::PowerState => vec![record.power_state.as_str().to_string()],
            GroupBy::GuestId => record.guest_id.iter().cloned().collect(),
        }
    }
}

/// Variables published for one host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostVars {
    pub guest_id: Option<String>,
    pub guest_full_name: Option<String>,
    pub networks: Vec<String>,
    pub power_state: PowerState,
    pub instance_uuid: Option<String>,
    pub template: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ansible_host: Option<String>,
}

impl From<&VmRecord> for HostVars {
    fn from(record: &VmRecord) -> Self {
        Self {
            guest_id: record.guest_id.clone(),
            guest_full_name: record.guest_full_name.clone(),
            networks: record.networks.clone(),
            power_state: record.power_state,
            instance_uuid: record.instance_uuid.clone(),
            template: record.template,
            ansible_host: record.ip_address.clone(),
        }
    }
}

/// The `_meta` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    pub hostvars: BTreeMap<String, HostVars>,
}

/// A complete inventory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryDocument {
    #[serde(flatten)]
    pub groups: BTreeMap<String, Vec<String>>,

    #[serde(rename = "_meta")]
    pub meta: Meta,
}

impl InventoryDocument {
    /// Group `records` by `group_by` and collect their host variables.
    ///
    /// Hosts keep record order within a group and appear once per group.
    /// When two records share a name, the later one's variables win.
    pub fn build(records: &[VmRecord], group_by: GroupBy) -> Self {
        let mut document = Self::default();

        for record in records {
            if record.name.is_empty() {
                continue;
            }

            for key in group_by.keys(record) {
                if key.is_empty() {
                    continue;
                }
                let hosts = document.groups.entry(key).or_default();
                if !hosts.contains(&record.name) {
                    hosts.push(record.name.clone());
                }
            }

            document
                .meta
                .hostvars
                .insert(record.name.clone(), HostVars::from(record));
        }

        document
    }

    /// Number of distinct hosts.
    pub fn host_count(&self) -> usize {
        self.meta.hostvars.len()
    }
}

/// Look up one host's variables in a serialized inventory.
///
/// Returns `None` when the host is unknown or the payload has no
/// `_meta.hostvars` section.
pub fn find_host_vars(data: &[u8], host: &str) -> serde_json::Result<Option<serde_json::Value>> {
    let value: serde_json::Value = serde_json::from_slice(data)?;
    Ok(value
        .get("_meta")
        .and_then(|meta| meta.get("hostvars"))
        .and_then(|vars| vars.get(host))
        .cloned())
}
