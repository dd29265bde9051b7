//! Logging setup.
//!
//! Events go to systemd's journal on Linux when it is reachable, otherwise to
//! a daily-rolling file. Warnings and errors are echoed to stderr as well, so
//! problems such as a corrupt catalog reach the person at the terminal.
//!
//! The level is taken from `SHOEBOX_LOG` (`debug`, `info`, `warn`, `error`;
//! default `info`).

use anyhow::Result;
use std::path::Path;
use std::sync::OnceLock;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

pub const LOG_ENV: &str = "SHOEBOX_LOG";

static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Install the global subscriber. File logs, when used, go under `log_dir`.
/// Fails if a subscriber is already installed.
pub fn init(log_dir: &Path) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    let terminal = fmt::layer()
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .with_filter(LevelFilter::WARN);

    let journald = journald_layer();
    let backend = if journald.is_some() { "journald" } else { "file" };

    let file = match journald {
        Some(_) => None,
        None => {
            std::fs::create_dir_all(log_dir)?;

            let appender = tracing_appender::rolling::daily(log_dir, "shoebox.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            // Dropping the guard stops the writer thread.
            let _ = FILE_GUARD.set(guard);

            Some(fmt::layer().with_writer(writer).with_ansi(false))
        }
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(journald)
        .with(file)
        .with(terminal)
        .try_init()?;

    tracing::debug!(backend, "Logging initialized");
    Ok(())
}

#[cfg(target_os = "linux")]
fn journald_layer() -> Option<tracing_journald::Layer> {
    tracing_journald::layer().ok()
}

#[cfg(not(target_os = "linux"))]
fn journald_layer() -> Option<tracing_subscriber::layer::Identity> {
    None
}
