//! Tracing subscriber setup for the CLI.
//!
//! Library crates only emit `tracing` events; this is the one place a
//! subscriber gets installed.
//!
//! Level selection:
//! - `--quiet` → nothing
//! - `-v` / `-vv` / `-vvv` → info / debug / trace
//! - otherwise `RUST_LOG`, falling back to "warn"

use std::path::Path;

use anyhow::Context;
use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Layer;
use tracing_subscriber::Registry;

use crate::args::GlobalArgs;

fn env_filter(args: &GlobalArgs) -> EnvFilter {
    if args.quiet {
        return EnvFilter::new("off");
    }
    match args.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    }
}

/// Install the global subscriber.
///
/// With `--log-file`, events go through a non-blocking file writer and the
/// returned `WorkerGuard` must be kept alive until the command finishes.
pub fn init_tracing(args: &GlobalArgs) -> Result<Option<WorkerGuard>> {
    let env_filter = env_filter(args);

    if let Some(path) = &args.log_file {
        let directory = path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let file_name = path
            .file_name()
            .with_context(|| format!("Log file path has no file name: {}", path.display()))?;

        let file_appender = tracing_appender::rolling::never(directory, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        let file_layer = fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_filter(env_filter);

        Registry::default()
            .with(file_layer)
            .try_init()
            .context("Failed to install tracing subscriber")?;
        return Ok(Some(guard));
    }

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(env_filter);

    Registry::default()
        .with(stderr_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;
    Ok(None)
}
