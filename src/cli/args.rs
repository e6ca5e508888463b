//! CLI argument definitions.
//!
//! The flags follow Ansible's dynamic inventory protocol (`--list`,
//! `--host <name>`) plus cache and connection controls.

use clap::{ArgGroup, Parser};
use std::path::PathBuf;

use crate::config::InventoryConfig;

/// vSphere Ansible Inventory.
#[derive(Debug, Parser)]
#[command(name = "vsphere-inventory")]
#[command(author, version, about, long_about = None)]
#[command(group(
    ArgGroup::new("action")
        .required(true)
        .multiple(true)
        .args(["list", "host", "reload_cache", "clear_cache"])
))]
#[command(after_help = "Example:\n  vsphere-inventory --list\n  \
    vsphere-inventory -s <vSphere.hostname> -u <vSphere_username> -p <vSphere_password> --list")]
pub struct Cli {
    /// List all VMs
    #[arg(short, long)]
    pub list: bool,

    /// Print the variables of a single guest
    #[arg(short = 'x', long, value_name = "NAME", visible_alias = "guest", short_alias = 'g')]
    pub host: Option<String>,

    /// Rebuild the cache from vSphere, then list
    #[arg(short, long)]
    pub reload_cache: bool,

    /// Remove the cached inventory
    #[arg(long)]
    pub clear_cache: bool,

    /// Path to config file (overrides default vsphere-inventory.yml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// vSphere FQDN
    #[arg(short = 's', long, env = "VSPHERE_HOST")]
    pub hostname: Option<String>,

    /// vSphere username
    #[arg(short, long, env = "VSPHERE_USER")]
    pub username: Option<String>,

    /// vSphere password
    #[arg(short, long, env = "VSPHERE_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Let command-line connection settings override the file.
    pub fn apply_overrides(&self, config: &mut InventoryConfig) {
        let overrides = [
            (&self.hostname, &mut config.vsphere.host),
            (&self.username, &mut config.vsphere.username),
            (&self.password, &mut config.vsphere.password),
        ];
        for (value, target) in overrides {
            if let Some(value) = value.as_ref().filter(|v| !v.is_empty()) {
                *target = value.clone();
            }
        }
    }
}
