//! Import-path rules.
//!
//! Configuration entries are parsed once into [`Rule`] values so matching never
//! has to look at the `/*` suffix convention again. A [`RuleSet`] keeps the
//! entries in configuration order, which is the tie-break between rules that
//! match the same request.

mod entry;

use anyhow::{Result, bail};
use std::fmt;

pub use entry::RuleEntry;

pub const DEFAULT_VCS: &str = "git";
pub const DEFAULT_BRANCH: &str = "main";

/// Suffix marking a wildcard import path pattern.
const WILDCARD_SUFFIX: &str = "/*";

/// Placeholder replaced by the project segment in a wildcard repository template.
pub const PLACEHOLDER: char = '*';

/// A validated import-path rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// Serves exactly one import path, e.g. `example.com` or `example.com/tool`.
    Exact {
        domain: String,
        repo: String,
        vcs: String,
        branch: String,
    },
    /// Serves every project directly below `prefix`, e.g. `example.com/*`.
    Wildcard {
        prefix: String,
        repo_template: String,
        vcs: String,
        branch: String,
    },
}

impl Rule {
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Rule::Wildcard { .. })
    }

    /// The import path (exact) or prefix (wildcard) this rule is keyed on.
    pub fn pattern(&self) -> &str {
        match self {
            Rule::Exact { domain, .. } => domain,
            Rule::Wildcard { prefix, .. } => prefix,
        }
    }

    /// The repository root (exact) or template (wildcard).
    pub fn repo(&self) -> &str {
        match self {
            Rule::Exact { repo, .. } => repo,
            Rule::Wildcard { repo_template, .. } => repo_template,
        }
    }

    pub fn vcs(&self) -> &str {
        match self {
            Rule::Exact { vcs, .. } | Rule::Wildcard { vcs, .. } => vcs,
        }
    }

    pub fn branch(&self) -> &str {
        match self {
            Rule::Exact { branch, .. } | Rule::Wildcard { branch, .. } => branch,
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Exact { domain, repo, .. } => write!(f, "{} -> {}", domain, repo),
            Rule::Wildcard {
                prefix,
                repo_template,
                ..
            } => write!(f, "{}{} -> {}", prefix, WILDCARD_SUFFIX, repo_template),
        }
    }
}

impl TryFrom<RuleEntry> for Rule {
    type Error = anyhow::Error;

    fn try_from(entry: RuleEntry) -> Result<Self, Self::Error> {
        let path = entry.path.trim();
        let repo = entry.repo_path.trim();

        if path.is_empty() {
            bail!("Invalid import path rule: 'path' cannot be empty");
        }
        if repo.is_empty() {
            bail!("Invalid import path rule '{}': 'repo_path' cannot be empty", path);
        }

        let vcs = entry
            .vcs
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_VCS.to_string());
        let branch = entry
            .branch
            .filter(|b| !b.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BRANCH.to_string());

        if let Some(prefix) = path.strip_suffix(WILDCARD_SUFFIX) {
            let prefix = normalize_pattern(prefix);
            if prefix.is_empty() {
                bail!("Invalid wildcard rule '{}': missing domain before '/*'", path);
            }
            if !repo.contains(PLACEHOLDER) {
                bail!(
                    "Invalid wildcard rule '{}': 'repo_path' must contain a '*' placeholder, got '{}'",
                    path,
                    repo
                );
            }
            Ok(Rule::Wildcard {
                prefix,
                repo_template: repo.to_string(),
                vcs,
                branch,
            })
        } else {
            let domain = normalize_pattern(path);
            if domain.is_empty() {
                bail!("Invalid import path rule '{}': missing domain", path);
            }
            Ok(Rule::Exact {
                domain,
                repo: repo.to_string(),
                vcs,
                branch,
            })
        }
    }
}

/// Trim surrounding slashes and lowercase the host part, which is case-insensitive.
fn normalize_pattern(pattern: &str) -> String {
    let trimmed = pattern.trim_matches('/');
    match trimmed.split_once('/') {
        Some((host, rest)) => format!("{}/{}", host.to_ascii_lowercase(), rest),
        None => trimmed.to_ascii_lowercase(),
    }
}

/// Ordered, immutable collection of rules loaded at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Convert configuration entries, keeping their order.
    /// Fails on the first entry that is not a usable rule.
    pub fn from_entries(entries: Vec<RuleEntry>) -> Result<Self> {
        let rules = entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| {
                Rule::try_from(entry).map_err(|e| e.context(format!("import_paths[{}]", index)))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    pub fn exact_rules(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter().filter(|r| !r.is_wildcard())
    }

    pub fn wildcard_rules(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter().filter(|r| r.is_wildcard())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl FromIterator<Rule> for RuleSet {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
