//! `--clear-cache` implementation.

use std::io::Write;

use crate::error::Result;
use crate::inventory::{InventoryProducer, VmSource};

use super::dispatcher::{Command, CommandResult};

/// Removes the cached snapshot.
pub struct ClearCacheCommand;

impl Command for ClearCacheCommand {
    fn execute<S: VmSource>(
        &self,
        producer: &InventoryProducer<S>,
        out: &mut dyn Write,
    ) -> Result<CommandResult> {
        let store = producer.store();
        if store.clear()? {
            writeln!(out, "Removed inventory cache at {}", store.path().display())?;
        } else {
            writeln!(out, "No inventory cache at {}", store.path().display())?;
        }
        Ok(CommandResult::success())
    }
}
