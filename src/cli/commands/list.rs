//! `--list` / `--reload-cache` implementation.

use std::io::Write;

use crate::error::Result;
use crate::inventory::{InventoryProducer, VmSource};

use super::dispatcher::{Command, CommandResult};

/// Prints the whole inventory document.
pub struct ListCommand {
    refresh: bool,
}

impl ListCommand {
    /// `refresh` forces a rebuild even when the cache is fresh.
    pub fn new(refresh: bool) -> Self {
        Self { refresh }
    }
}

impl Command for ListCommand {
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

        out.write_all(snapshot.data())?;
        out.write_all(b"\n")?;
        out.flush()?;
        Ok(CommandResult::success())
    }
}
