//! Cache-or-rebuild orchestration.

use tracing::{debug, info, warn};

use crate::cache::{format_duration, CacheStore, Snapshot};
use crate::error::Result;

use super::{GroupBy, InventoryDocument, InventoryFilter, VmSource};

/// How VM records become an inventory document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Shaping {
    pub filter: InventoryFilter,
    pub group_by: GroupBy,
}

/// Serves the inventory from cache while it is fresh, otherwise rebuilds it
/// from the management server and stores the result.
pub struct InventoryProducer<S> {
    store: CacheStore,
    source: S,
    ttl_seconds: u64,
    shaping: Shaping,
}

impl<S: VmSource> InventoryProducer<S> {
    /// Create a producer. `ttl_seconds == 0` disables cache hits.
    pub fn new(store: CacheStore, source: S, ttl_seconds: u64) -> Self {
        Self {
            store,
            source,
            ttl_seconds,
            shaping: Shaping::default(),
        }
    }

    /// Set how records are filtered and grouped.
    pub fn with_shaping(mut self, shaping: Shaping) -> Self {
        self.shaping = shaping;
        self
    }

    pub fn store(&self) -> &CacheStore {
        &self.store
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Return the cached snapshot if it is fresh, else rebuild.
    ///
    /// Fails only when a rebuild is needed and the remote query fails.
    pub fn get_inventory(&self) -> Result<Snapshot> {
        match self.store.load() {
            Some(snapshot) => {
                let verdict = self.store.validate(&snapshot, self.ttl_seconds);
                if verdict.is_fresh() {
                    debug!(
                        "Serving cached inventory ({} old)",
                        format_duration(snapshot.age(self.store.now()))
                    );
                    return Ok(snapshot);
                }
                debug!("Cached inventory not usable: {:?}", verdict);
            }
            None => debug!("No cached inventory at {:?}", self.store.path()),
        }

        self.refresh()
    }

    /// Rebuild from the management server regardless of the cache.
    ///
    /// The new snapshot is written back; a failed write is logged and the
    /// snapshot is still returned. Nothing is written if the query fails.
    pub fn refresh(&self) -> Result<Snapshot> {
        info!("Querying vSphere for virtual machines");
        let records = self.source.list_vms()?;
        let total = records.len();

        let records = self.shaping.filter.apply(records);
        let document = InventoryDocument::build(&records, self.shaping.group_by);
        info!(
            "Built inventory: {} hosts in {} groups ({} VMs before filtering)",
            document.host_count(),
            document.groups.len(),
            total
        );

        let snapshot = Snapshot::new(serde_json::to_vec(&document)?, self.store.now());
        if let Err(e) = self.store.save(&snapshot) {
            warn!("{}", e);
        }

        Ok(snapshot)
    }
}
