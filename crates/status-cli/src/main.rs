//! service-status CLI
//!
//! Records a service's last-run outcome in the shared status directory and
//! registers the service in the manifest.
//!
//! Exits non-zero only for configuration or argument problems. A failed
//! write after that is logged and the process still exits 0, whatever exit
//! code was being reported.

mod cli;
mod error;

use clap::Parser;
use colored::Colorize;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cli::Cli;
use error::{CliError, Result};
use status_core::{ServiceName, StatusDirectoryResolver};
use status_fs::{NormalizedPath, ValueMode};

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {}: {}", "error:".red().bold(), e.label(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let service = ServiceName::new(cli.service_name.as_str())?;
    let resolver = build_resolver(&cli)?;
    tracing::debug!(config = %resolver.config_path(), "resolving status directory");

    let summary = status_core::run(&resolver, &service, cli.exit_code)?;
    tracing::debug!(degraded = summary.is_degraded(), ?summary, "reported");
    Ok(())
}

/// Notices and degraded writes are always shown; `--verbose` adds debug
/// detail. `RUST_LOG` overrides both.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(verbose)
        .without_time()
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("{} tracing subscriber already installed", "warning:".yellow().bold());
    }
}

fn build_resolver(cli: &Cli) -> Result<StatusDirectoryResolver> {
    let resolver = match &cli.config {
        Some(config) => StatusDirectoryResolver::new(NormalizedPath::new(config)),
        None => StatusDirectoryResolver::for_project_root(&NormalizedPath::new(project_root(cli)?)),
    };

    let mode = if cli.typed_values {
        ValueMode::Typed
    } else {
        ValueMode::Strings
    };

    Ok(resolver.value_mode(mode).check_version(cli.check_version))
}

/// `--root`, else the directory above the one holding the binary
/// (`<root>/bin/service-status`), else the working directory.
fn project_root(cli: &Cli) -> Result<PathBuf> {
    if let Some(root) = &cli.root {
        return Ok(root.clone());
    }

    let from_exe = std::env::current_exe()
        .ok()
        .and_then(|exe| ancestor(&exe, 2));
    match from_exe {
        Some(root) => Ok(root),
        None => std::env::current_dir().map_err(CliError::from),
    }
}

fn ancestor(path: &std::path::Path, levels: usize) -> Option<PathBuf> {
    let mut current = path;
    for _ in 0..levels {
        current = current.parent()?;
    }
    Some(current.to_path_buf())
}
