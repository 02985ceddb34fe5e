use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use config::{Config, Environment, File, FileFormat};
use rpick::app_dirs;

use crate::cli::CliArgs;

/// Prefix of `RPICK__PICKER__ENDPOINT_URL`-style variables.
const ENV_PREFIX: &str = "rpick";

/// One TOML file in the layering order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct ConfigFile {
    pub path: PathBuf,
    /// Files named with `--config` must exist.
    pub required: bool,
}

/// Every file that may contribute, lowest precedence first.
pub(super) fn config_files(cli: &CliArgs) -> Vec<ConfigFile> {
    let mut files = Vec::new();
    if !cli.no_config {
        let optional = |path| ConfigFile {
            path,
            required: false,
        };
        files.extend(app_dirs::config_file().ok().map(optional));
        if let Ok(cwd) = env::current_dir() {
            files.push(optional(cwd.join(".rpick.toml")));
            files.push(optional(cwd.join("rpick.toml")));
        }
    }
    files.extend(cli.config.iter().map(|path| ConfigFile {
        path: path.clone(),
        required: true,
    }));
    files
}

/// Layer `files`, then the environment, into one config tree.
pub(super) fn build_config(files: &[ConfigFile]) -> Result<Config> {
    let mut builder = Config::builder();
    for file in files {
        if file.required && !file.path.is_file() {
            bail!("config file {} does not exist", file.path.display());
        }
        builder = builder.add_source(
            File::from(file.path.clone())
                .format(FileFormat::Toml)
                .required(false),
        );
    }
    builder
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .context("failed to read configuration")
}
