//! Virtual machine records returned by the management server.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Power state of a virtual machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PowerState {
    PoweredOn,
    PoweredOff,
    Suspended,
}

impl PowerState {
    /// Parse the vCenter REST spelling (`POWERED_ON`, ...).
    pub fn from_api(value: &str) -> Option<Self> {
        match value {
            "POWERED_ON" => Some(PowerState::PoweredOn),
            "POWERED_OFF" => Some(PowerState::PoweredOff),
            "SUSPENDED" => Some(PowerState::Suspended),
            _ => None,
        }
    }

    /// Name as it appears in host variables.
    pub fn as_str(self) -> &'static str {
        match self {
            PowerState::PoweredOn => "poweredOn",
            PowerState::PoweredOff => "poweredOff",
            PowerState::Suspended => "suspended",
        }
    }
}

impl fmt::Display for PowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One virtual machine as seen by the inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VmRecord {
    /// Inventory host name (guest host name, else VM name).
    pub name: String,
    pub power_state: PowerState,
    /// Guest OS identifier, e.g. `CENTOS_64` or `centos64Guest`.
    pub guest_id: Option<String>,
    pub guest_full_name: Option<String>,
    /// Names of networks with a connected NIC.
    pub networks: Vec<String>,
    pub instance_uuid: Option<String>,
    pub template: bool,
    pub ip_address: Option<String>,
}

impl VmRecord {
    /// Create a record with only a name and power state.
    pub fn new(name: impl Into<String>, power_state: PowerState) -> Self {
        Self {
            name: name.into(),
            power_state,
            guest_id: None,
            guest_full_name: None,
            networks: Vec::new(),
            instance_uuid: None,
            template: false,
            ip_address: None,
        }
    }

    pub fn with_guest_id(mut self, guest_id: impl Into<String>) -> Self {
        self.guest_id = Some(guest_id.into());
        self
    }

    pub fn with_guest_full_name(mut self, name: impl Into<String>) -> Self {
        self.guest_full_name = Some(name.into());
        self
    }

    pub fn with_network(mut self, network: impl Into<String>) -> Self {
        self.networks.push(network.into());
        self
    }

    pub fn with_instance_uuid(mut self, uuid: impl Into<String>) -> Self {
        self.instance_uuid = Some(uuid.into());
        self
    }

    pub fn with_ip_address(mut self, ip: impl Into<String>) -> Self {
        self.ip_address = Some(ip.into());
        self
    }

    /// Mark the record as a template.
    pub fn as_template(mut self) -> Self {
        self.template = true;
        self
    }
}
