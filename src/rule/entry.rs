//! Raw import-path record as it appears in the configuration file.

use serde::{Deserialize, Serialize};

/// One entry of the `import_paths` list.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct RuleEntry {
    /// Import path pattern, either `example.com` or `example.com/*`
    pub path: String,
    /// Repository root, or a template containing `*` for wildcard entries
    pub repo_path: String,
    /// Version control system, "git" when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vcs: Option<String>,
    /// Default branch, "main" when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
}
