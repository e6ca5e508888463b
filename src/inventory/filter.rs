//! Record filtering.

use serde::{Deserialize, Serialize};

use super::VmRecord;

/// Which records make it into the inventory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryFilter {
    /// Accepted guest ids. Empty accepts any.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub guest_ids: Vec<String>,

    /// Keep VM templates.
    pub include_templates: bool,
}

impl InventoryFilter {
    /// Whether `record` passes the filter.
    pub fn accepts(&self, record: &VmRecord) -> bool {
        if record.template && !self.include_templates {
            return false;
        }
        if self.guest_ids.is_empty() {
            return true;
        }
        record
            .guest_id
            .as_ref()
            .is_some_and(|id| self.guest_ids.iter().any(|g| g == id))
    }

    /// Keep accepted records, preserving order.
    pub fn apply(&self, records: Vec<VmRecord>) -> Vec<VmRecord> {
        records.into_iter().filter(|r| self.accepts(r)).collect()
    }
}
