use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "walletui.log";
const LOG_ENV: &str = "WALLETUI_LOG";

/// Routes `tracing` output to a file in the data directory.
/// The terminal belongs to the TUI, so nothing is written to stdout/stderr.
/// Verbosity comes from `WALLETUI_LOG` (env-filter syntax), default `info`.
pub(crate) fn init(data_dir: &Path) -> Result<()> {
    let path = data_dir.join(LOG_FILE);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise logging: {e}"))?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "walletui starting");
    Ok(())
}
