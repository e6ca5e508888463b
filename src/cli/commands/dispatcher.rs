//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI flags to commands

use std::io::Write;
use std::sync::Arc;

use crate::cache::{CacheStore, SystemClock};
use crate::cli::args::Cli;
use crate::cli::source::InteractiveSource;
use crate::config::InventoryConfig;
use crate::error::Result;
use crate::inventory::{InventoryProducer, VmSource};

use super::cache::ClearCacheCommand;
use super::host::HostCommand;
use super::list::ListCommand;

/// Trait for command implementations.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `producer` - Source of the inventory (cache or vSphere)
    /// * `out` - Where the command's output goes
    fn execute<S: VmSource>(
        &self,
        producer: &InventoryProducer<S>,
        out: &mut dyn Write,
    ) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }
}

/// Routes parsed flags to command implementations.
pub struct CommandDispatcher {
    config: InventoryConfig,
}

impl CommandDispatcher {
    /// Create a dispatcher for a fully resolved configuration.
    pub fn new(config: InventoryConfig) -> Self {
        Self { config }
    }

    /// Build the producer the commands run against.
    pub fn producer(&self) -> InventoryProducer<InteractiveSource> {
        let store = CacheStore::with_clock(&self.config.cache.path, Arc::new(SystemClock));
        let source = InteractiveSource::new(self.config.vsphere.clone());
        InventoryProducer::new(store, source, self.config.cache.ttl)
            .with_shaping(self.config.shaping())
    }

    /// Dispatch and execute the requested action.
    ///
    /// `--clear-cache` runs first and reports on `err`; inventory output
    /// goes to `out`. `--host` takes precedence over `--list`, and
    /// `--reload-cache` rebuilds before either prints.
    pub fn dispatch(
        &self,
        cli: &Cli,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> Result<CommandResult> {
        self.dispatch_with(&self.producer(), cli, out, err)
    }

    /// Same as [`dispatch`](Self::dispatch) with an explicit producer.
    pub fn dispatch_with<S: VmSource>(
        &self,
        producer: &InventoryProducer<S>,
        cli: &Cli,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> Result<CommandResult> {
        let mut result = CommandResult::success();

        if cli.clear_cache {
            result = ClearCacheCommand.execute(producer, err)?;
        }

        if let Some(name) = &cli.host {
            result = HostCommand::new(name.clone())
                .with_refresh(cli.reload_cache)
                .execute(producer, out)?;
        } else if cli.list || cli.reload_cache {
            result = ListCommand::new(cli.reload_cache).execute(producer, out)?;
        }

        Ok(result)
    }
}
