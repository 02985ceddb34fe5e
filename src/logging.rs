//! Diagnostic logging.
//!
//! The terminal belongs to the UI while a picker runs, so events are written
//! to `<data dir>/rpick.log` instead of stderr. The filter is read from
//! `RPICK_LOG` using the usual `tracing` directive syntax, e.g.
//! `RPICK_LOG=rpick=debug`.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use crate::app_dirs;

pub const LOG_ENV: &str = "RPICK_LOG";
const DEFAULT_FILTER: &str = "warn";

/// Install the global subscriber. Later calls are no-ops.
pub fn initialize() -> Result<Option<PathBuf>> {
    let path = app_dirs::log_file()?;
    let file = open_log(&path)?;

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(path = %path.display(), "logging initialized");
        Ok(Some(path))
    } else {
        Ok(None)
    }
}

fn filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

fn open_log(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create log directory {}", parent.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))
}
