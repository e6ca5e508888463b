//! Inventory model and production.
//!
//! - [`record`] - VM records returned by the management server
//! - [`filter`] - which records make it into the inventory
//! - [`document`] - the Ansible JSON document built from records
//! - [`source`] - the [`VmSource`] seam to the management server
//! - [`producer`] - cache-or-rebuild orchestration

pub mod document;
pub mod filter;
pub mod producer;
pub mod record;
pub mod source;

pub use document::{find_host_vars, GroupBy, HostVars, InventoryDocument, Meta};
pub use filter::InventoryFilter;
pub use producer::{InventoryProducer, Shaping};
pub use record::{PowerState, VmRecord};
pub use source::VmSource;
