//! Configuration file loading.
//!
//! ```yaml
//! listen: "0.0.0.0:8080"
//! import_paths:
//!   - path: example.com/*
//!     repo_path: https://git.example.com/*.git
//!     vcs: git
//!     branch: main
//! ```

mod paths;

use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::rule::{RuleEntry, RuleSet};
use crate::runtime::Runtime;

pub use paths::{CONFIG_FILE_NAME, default_config_path};

/// Address used when neither the command line nor the file sets one.
pub const DEFAULT_LISTEN: &str = "0.0.0.0:8080";

/// On-disk configuration.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct ConfigFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listen: Option<String>,
    /// A missing or null list is the same as an empty one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub import_paths: Option<Vec<RuleEntry>>,
}

/// Validated configuration handed to the server.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub listen: Option<String>,
    pub rules: RuleSet,
}

impl Settings {
    #[tracing::instrument(skip(runtime))]
    pub fn load<R: Runtime>(runtime: &R, path: &Path) -> Result<Self> {
        if !runtime.exists(path) {
            anyhow::bail!("Config file not found: {}", path.display());
        }

        let content = runtime
            .read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let settings = Self::parse(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;

        debug!(
            "Loaded {} import path rule(s) from {}",
            settings.rules.len(),
            path.display()
        );
        Ok(settings)
    }

    pub fn parse(content: &str) -> Result<Self> {
        // An empty document deserializes to nothing at all
        let file: ConfigFile = if content.trim().is_empty() {
            ConfigFile::default()
        } else {
            serde_yaml_bw::from_str(content).context("Failed to parse YAML")?
        };

        Ok(Self {
            listen: file.listen,
            rules: RuleSet::from_entries(file.import_paths.unwrap_or_default())?,
        })
    }

    /// Listen address: explicit override, then the file, then [`DEFAULT_LISTEN`].
    pub fn listen_addr(&self, override_addr: Option<&str>) -> String {
        override_addr
            .or(self.listen.as_deref())
            .unwrap_or(DEFAULT_LISTEN)
            .to_string()
    }
}
