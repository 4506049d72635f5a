use anyhow::{Context, Result};
use log::debug;
use std::path::PathBuf;

use crate::runtime::Runtime;

pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Locate the configuration file when none is given explicitly.
///
/// `config/config.yaml` under the working directory wins when it exists,
/// otherwise `<config dir>/govanity/config.yaml` is used.
#[tracing::instrument(skip(runtime))]
pub fn default_config_path<R: Runtime>(runtime: &R) -> Result<PathBuf> {
    let local = runtime.current_dir()?.join("config").join(CONFIG_FILE_NAME);
    if runtime.exists(&local) {
        debug!("Using config from working directory: {}", local.display());
        return Ok(local);
    }

    let config_dir = runtime
        .config_dir()
        .context("Could not find configuration directory; pass --config")?;
    Ok(config_dir.join("govanity").join(CONFIG_FILE_NAME))
}
