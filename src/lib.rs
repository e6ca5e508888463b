//! vSphere dynamic inventory for Ansible.
//!
//! Lists the virtual machines of a vCenter server in Ansible's dynamic
//! inventory format. Because walking a large vCenter is slow, the rendered
//! inventory is cached on disk and reused until it is older than a
//! configurable TTL.
//!
//! # Modules
//!
//! - [`cache`] - On-disk snapshot store and TTL validation
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading, parsing, and validation
//! - [`error`] - Error types and result aliases
//! - [`inventory`] - VM records, grouping, and the cache-or-refresh producer
//! - [`vsphere`] - vCenter REST client
//!
//! # Example
//!
//! ```
//! use vsphere_inventory::cache::CacheStore;
//! use vsphere_inventory::error::RemoteQueryError;
//! use vsphere_inventory::inventory::{InventoryProducer, PowerState, VmRecord, VmSource};
//!
//! struct Lab;
//!
//! impl VmSource for Lab {
//!     fn list_vms(&self) -> Result<Vec<VmRecord>, RemoteQueryError> {
//!         Ok(vec![VmRecord::new("web01", PowerState::PoweredOn).with_network("VM Network")])
//!     }
//! }
//!
//! let dir = std::env::temp_dir().join(format!("inv-doc-{}", std::process::id()));
//! let producer = InventoryProducer::new(CacheStore::new(dir.join("cache.json")), Lab, 60);
//! let snapshot = producer.get_inventory().unwrap();
//! let text = std::str::from_utf8(snapshot.data()).unwrap();
//! assert!(text.contains("web01"));
//! # let _ = std::fs::remove_dir_all(dir);
//! ```

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod inventory;
pub mod vsphere;

pub use error::{InventoryError, Result};
