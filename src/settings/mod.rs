//! Configuration loading and resolution.
//!
//! Values are layered from default files, `--config` files, `RPICK__*`
//! environment variables and CLI flags, then validated into a
//! [`ResolvedConfig`].

mod raw;
mod resolved;
mod sources;

use anyhow::{Context, Result};

use crate::cli::CliArgs;
use raw::RawConfig;
pub use resolved::ResolvedConfig;
use sources::{build_config, config_files};

pub fn load(cli: &CliArgs) -> Result<ResolvedConfig> {
    let files = config_files(cli);
    let mut raw: RawConfig = build_config(&files)?
        .try_deserialize()
        .context("failed to deserialize configuration")?;
    raw.apply_cli_overrides(cli);
    let mut resolved = raw.resolve()?;
    resolved.sources = files
        .into_iter()
        .map(|file| file.path)
        .filter(|path| path.is_file())
        .collect();
    Ok(resolved)
}
