//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which maps the
//! inventory flags (`--list`, `--host`, `--reload-cache`, `--clear-cache`)
//! to their implementations and builds the shared
//! [`InventoryProducer`](crate::inventory::InventoryProducer).

pub mod cache;
pub mod dispatcher;
pub mod host;
pub mod list;

pub use cache::ClearCacheCommand;
pub use dispatcher::{Command, CommandDispatcher, CommandResult};
pub use host::HostCommand;
pub use list::ListCommand;
