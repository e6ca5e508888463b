//! Command-line interface for the inventory.
//!
//! This module provides the CLI argument parsing using clap's derive macros
//! and command implementations.

pub mod args;
pub mod commands;
pub mod source;

pub use args::Cli;
pub use commands::{Command, CommandDispatcher, CommandResult};
pub use source::InteractiveSource;
