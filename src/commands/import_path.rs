//! Import path argument parsing for the resolve command.

use anyhow::{Result, bail};
use std::fmt;
use std::str::FromStr;

use crate::resolver::{normalize_host, normalize_path};

/// An import path as typed on the command line.
/// Format: "host", "host/path" or "https://host/path?go-get=1"
#[derive(Debug, PartialEq, Clone)]
pub struct ImportPath {
    pub host: String,
    pub path: String,
}

impl fmt::Display for ImportPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.host)
        } else {
            write!(f, "{}/{}", self.host, self.path)
        }
    }
}

impl FromStr for ImportPath {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s
            .strip_prefix("https://")
            .or_else(|| s.strip_prefix("http://"))
            .unwrap_or(s);
        let s = s.split(['?', '#']).next().unwrap_or_default();

        let (host, path) = s.split_once('/').unwrap_or((s, ""));
        let host = normalize_host(host);
        if host.is_empty() {
            bail!("Invalid import path '{}'. Expected 'host' or 'host/path'.", s);
        }

        Ok(ImportPath {
            host,
            path: normalize_path(path).to_string(),
        })
    }
}
