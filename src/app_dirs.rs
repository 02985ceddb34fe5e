//! Where `rpick` keeps its config file and its log.
//!
//! Each location can be pinned with an environment variable; otherwise the
//! platform directory from the `directories` crate is used.

use std::env;
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use directories::ProjectDirs;

/// Name of the per-user config file inside [`AppDir::Config`].
pub const CONFIG_FILE: &str = "config.toml";
/// Name of the log file inside [`AppDir::Data`].
pub const LOG_FILE: &str = "rpick.log";

/// The directories `rpick` writes to or reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppDir {
    Config,
    Data,
}

impl AppDir {
    /// Variable that overrides this directory. Empty values are ignored.
    pub fn env_var(self) -> &'static str {
        match self {
            AppDir::Config => "RPICK_CONFIG_DIR",
            AppDir::Data => "RPICK_DATA_DIR",
        }
    }

    pub fn path(self) -> Result<PathBuf> {
        if let Some(dir) = env::var_os(self.env_var()).filter(|value| !value.is_empty()) {
            return Ok(PathBuf::from(dir));
        }
        let dirs = ProjectDirs::from("io", "rpick", "rpick")
            .ok_or_else(|| anyhow!("no home directory to place rpick files in"))?;
        Ok(match self {
            AppDir::Config => dirs.config_local_dir().to_path_buf(),
            AppDir::Data => dirs.data_local_dir().to_path_buf(),
        })
    }

    /// The path for display, or why it cannot be determined.
    pub fn describe(self) -> String {
        match self.path() {
            Ok(path) => path.display().to_string(),
            Err(err) => format!("unavailable ({err})"),
        }
    }
}

pub fn config_file() -> Result<PathBuf> {
    Ok(AppDir::Config.path()?.join(CONFIG_FILE))
}

pub fn log_file() -> Result<PathBuf> {
    Ok(AppDir::Data.path()?.join(LOG_FILE))
}
