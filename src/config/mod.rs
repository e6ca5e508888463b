//! Configuration loading and validation.
//!
//! - Schema definitions in [`schema`]
//! - File discovery, parsing and path expansion in [`loader`]
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use vsphere_inventory::config::parse_config;
//!
//! let config = parse_config(
//!     "cache:\n  ttl: 5m\nvsphere:\n  host: vcenter.example.com\n",
//!     Path::new("vsphere-inventory.yml"),
//! )
//! .unwrap();
//! assert_eq!(config.cache.ttl, 300);
//! assert_eq!(config.vsphere.base_url(), "https://vcenter.example.com:443");
//! ```
//!
//! # Configuration File Locations
//!
//! 1. `--config <path>`
//! 2. `$VSPHERE_INVENTORY_CONFIG`
//! 3. `vsphere-inventory.yml` next to the executable
//! 4. `vsphere-inventory.yml` in the working directory
//!
//! Without a file, built-in defaults apply.

pub mod loader;
pub mod schema;

pub use loader::{
    expand_path, load_config, load_config_file, parse_config, validate, ConfigSource,
    CONFIG_ENV_VAR, CONFIG_FILE_NAME,
};
pub use schema::{CacheSettings, InventoryConfig, InventorySettings, VsphereSettings};
