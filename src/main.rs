//! vSphere inventory CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use vsphere_inventory::cli::{Cli, CommandDispatcher};
use vsphere_inventory::config::load_config;

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is WARN
///
/// Logs go to stderr; stdout is reserved for inventory JSON.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("vsphere_inventory=debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("vsphere_inventory=warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

fn run(cli: &Cli) -> vsphere_inventory::Result<i32> {
    let mut config = load_config(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);
    tracing::debug!("Resolved configuration: {:?}", config);

    let dispatcher = CommandDispatcher::new(config);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut err = std::io::stderr();
    let result = dispatcher.dispatch(cli, &mut out, &mut err)?;
    Ok(result.exit_code)
}

/// Clamp a command exit code into the range a process can report.
fn exit_status(code: i32) -> u8 {
    u8::try_from(code).unwrap_or(1)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("vsphere-inventory {} starting", env!("CARGO_PKG_VERSION"));

    match run(&cli) {
        Ok(code) => ExitCode::from(exit_status(code)),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}
