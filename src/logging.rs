//! File-based `tracing` setup. The terminal belongs to the game, so log
//! lines never go to stdout or stderr.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

pub const LOG_FILE: &str = "floatipop.log";
/// Overrides the configured filter, e.g. `FLOATIPOP_LOG=debug`.
pub const LOG_ENV: &str = "FLOATIPOP_LOG";

/// Build the filter from `FLOATIPOP_LOG`, falling back to `default_filter`
/// and then to `info`.
pub fn filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Append log lines to `<dir>/floatipop.log`. Returns the log path.
pub fn init(dir: &Path, default_filter: &str) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter(default_filter))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    Ok(path)
}
