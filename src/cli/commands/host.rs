//! `--host <name>` implementation.

use std::io::Write;

use crate::error::Result;
use crate::inventory::{find_host_vars, InventoryProducer, VmSource};

use super::dispatcher::{Command, CommandResult};

/// Prints one host's variables, or `{}` for an unknown host.
pub struct HostCommand {
    name: String,
    refresh: bool,
}

impl HostCommand {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            refresh: false,
        }
    }

    /// Rebuild the inventory before looking the host up.
    pub fn with_refresh(mut self, refresh: bool) -> Self {
        self.refresh = refresh;
        self
    }
}

impl Command for HostCommand {
    fn execute<S: VmSource>(
        &self,
        producer: &InventoryProducer<S>,
        out: &mut dyn Write,
    ) -> Result<CommandResult> {
        let snapshot = if self.refresh {
            producer.refresh()?
        } else {
            producer.get_inventory()?
        };
        let vars = find_host_vars(snapshot.data(), &self.name)?;
        if vars.is_none() {
            tracing::debug!("Host '{}' not in inventory", self.name);
        }

        let vars = vars.unwrap_or_else(|| serde_json::Value::Object(Default::default()));
        serde_json::to_writer(&mut *out, &vars)?;
        out.write_all(b"\n")?;
        out.flush()?;
        Ok(CommandResult::success())
    }
}
