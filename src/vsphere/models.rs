//! vCenter REST response bodies.
//!
//! Only the fields the inventory reads are declared; everything else in the
//! responses is ignored.

use serde::Deserialize;
use std::collections::BTreeMap;

/// Entry of `GET /api/vcenter/vm`.
#[derive(Debug, Clone, Deserialize)]
pub struct VmSummary {
    /// Managed object id, e.g. `vm-42`.
    pub vm: String,
    pub name: String,
    pub power_state: String,
}

/// Body of `GET /api/vcenter/vm/{vm}`.
#[derive(Debug, Clone, Deserialize)]
pub struct VmInfo {
    #[serde(rename = "guest_OS")]
    pub guest_os: Option<String>,
    pub power_state: Option<String>,
    #[serde(default)]
    pub nics: BTreeMap<String, NicInfo>,
    pub identity: Option<VmIdentity>,
}

impl VmInfo {
    /// Guest OS as a vSphere `guestId` (`centos64Guest`), the spelling
    /// inventory filters and host variables use.
    pub fn guest_id(&self) -> Option<String> {
        self.guest_os
            .as_deref()
            .filter(|os| !os.is_empty())
            .map(vim_guest_id)
    }

    /// Network names of NICs that are currently connected, in NIC key order.
    pub fn connected_networks(&self) -> Vec<String> {
        self.nics
            .values()
            .filter(|nic| nic.state == "CONNECTED")
            .filter_map(|nic| {
                nic.backing
                    .network_name
                    .clone()
                    .or_else(|| nic.backing.network.clone())
            })
            .collect()
    }
}

/// Convert a REST `GuestOS` constant to the matching `guestId`.
///
/// `CENTOS_64` becomes `centos64Guest` and `WINDOWS_9_64` becomes
/// `windows9_64Guest`: words are camel-cased, a number joins the word before
/// it, and consecutive numbers keep their underscore.
pub fn vim_guest_id(guest_os: &str) -> String {
    let mut id = String::with_capacity(guest_os.len() + 5);
    let mut prev_numeric = false;

    for (i, part) in guest_os.split('_').filter(|p| !p.is_empty()).enumerate() {
        let numeric = part.starts_with(|c: char| c.is_ascii_digit());
        if i == 0 {
            id.push_str(&part.to_ascii_lowercase());
        } else if numeric {
            if prev_numeric {
                id.push('_');
            }
            id.push_str(&part.to_ascii_lowercase());
        } else if part == "XP" {
            id.push_str(part);
        } else {
            let mut chars = part.chars();
            if let Some(first) = chars.next() {
                id.push(first.to_ascii_uppercase());
                id.push_str(&chars.as_str().to_ascii_lowercase());
            }
        }
        prev_numeric = numeric;
    }

    id.push_str("Guest");
    id
}

#[derive(Debug, Clone, Deserialize)]
pub struct NicInfo {
    #[serde(default)]
    pub state: String,
    pub backing: NicBacking,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NicBacking {
    pub network_name: Option<String>,
    pub network: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VmIdentity {
    pub instance_uuid: Option<String>,
}

/// Body of `GET /api/vcenter/vm/{vm}/guest/identity`. Only available while
/// VMware Tools is running.
#[derive(Debug, Clone, Deserialize)]
pub struct GuestIdentity {
    pub host_name: Option<String>,
    pub ip_address: Option<String>,
    pub full_name: Option<LocalizableMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocalizableMessage {
    pub default_message: String,
}
