//! Library integration tests.

use std::cell::Cell;
use std::sync::Arc;

use tempfile::TempDir;
use vsphere_inventory::cache::{CacheStore, FixedClock, Snapshot, ValidationResult};
use vsphere_inventory::error::RemoteQueryError;
use vsphere_inventory::inventory::{InventoryProducer, PowerState, VmRecord, VmSource};
use vsphere_inventory::InventoryError;

const NOW: i64 = 1_700_000_000;

struct CountingSource {
    calls: Cell<usize>,
}

impl VmSource for CountingSource {
    fn list_vms(&self) -> Result<Vec<VmRecord>, RemoteQueryError> {
        self.calls.set(self.calls.get() + 1);
        Ok(vec![
            VmRecord::new("web01", PowerState::PoweredOn).with_network("VM Network"),
            VmRecord::new("db01", PowerState::PoweredOff).with_network("Backend"),
        ])
    }
}

#[test]
fn error_types_are_public() {
    let err = InventoryError::ConfigValidationError {
        message: "cache.path must not be empty".into(),
    };
    assert!(err.to_string().contains("cache.path"));
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> vsphere_inventory::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use clap::Parser;
    use vsphere_inventory::cli::Cli;

    let cli = Cli::parse_from(["vsphere-inventory", "--host", "web01"]);
    assert_eq!(cli.host.as_deref(), Some("web01"));
    assert!(!cli.list);
}

#[test]
fn config_is_parsed_through_public_api() {
    let config = vsphere_inventory::config::parse_config(
        "cache:\n  path: /var/tmp/inv.json\n  ttl: 1h\ninventory:\n  group_by: power_state\n",
        std::path::Path::new("vsphere-inventory.yml"),
    )
    .unwrap();

    assert_eq!(config.cache.ttl, 3600);
    assert_eq!(config.cache.path, std::path::PathBuf::from("/var/tmp/inv.json"));
}

#[test]
fn producer_serves_second_call_from_cache() {
    let temp = TempDir::new().unwrap();
    let store =
        CacheStore::with_clock(temp.path().join("inventory.json"), Arc::new(FixedClock(NOW)));
    let producer = InventoryProducer::new(
        store,
        CountingSource {
            calls: Cell::new(0),
        },
        600,
    );

    let first = producer.get_inventory().unwrap();
    let second = producer.get_inventory().unwrap();

    assert_eq!(producer.source().calls.get(), 1);
    assert_eq!(first, second);
    assert_eq!(first.created_at(), NOW);
}

#[test]
fn snapshot_written_by_one_store_is_read_by_another() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("inventory.json");
    let writer = CacheStore::with_clock(&path, Arc::new(FixedClock(NOW)));
    writer
        .save(&Snapshot::new(r#"{"_meta":{"hostvars":{}}}"#, NOW - 10))
        .unwrap();

    let reader = CacheStore::with_clock(&path, Arc::new(FixedClock(NOW)));
    let loaded = reader.load().unwrap();

    assert_eq!(loaded.created_at(), NOW - 10);
    assert_eq!(reader.validate(&loaded, 10), ValidationResult::Expired);
    assert_eq!(reader.validate(&loaded, 11), ValidationResult::Fresh);
}
