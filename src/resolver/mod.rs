//! Import path resolution.
//!
//! Given the host and path of a request and the configured [`RuleSet`], decide
//! which rule applies and compute the VCS metadata to advertise. Resolution is
//! a pure function of its inputs: the rule set is only read, and every failure
//! (no rule, invalid path, wildcard without a project) collapses into `None` so
//! callers cannot tell configuration gaps from bad input.

mod path;

use log::debug;
use serde::Serialize;

use crate::rule::{PLACEHOLDER, Rule, RuleSet};

pub use path::is_valid_package_path;

/// Metadata rendered into the `go-import` page.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ImportMetadata {
    /// Host plus requested path, e.g. `example.com/widget`
    pub import_root: String,
    pub vcs: String,
    /// Repository URL handed to the VCS tool
    pub vcs_root: String,
    pub branch: String,
}

/// Resolve a request against the rule set.
///
/// Exact rules are tried before wildcard rules, whatever their position in the
/// set; within each kind the first matching rule in configuration order wins.
#[tracing::instrument(skip(rules))]
pub fn resolve(host: &str, path: &str, rules: &RuleSet) -> Option<ImportMetadata> {
    let path = normalize_path(path);
    if !is_valid_host(host) {
        debug!("Rejecting request with host '{}'", host);
        return None;
    }

    let request_path = if path.is_empty() {
        host.to_string()
    } else {
        format!("{}/{}", host, path)
    };

    let matched =
        find_exact(&request_path, rules).or_else(|| find_wildcard(&request_path, rules));
    let Some(rule) = matched else {
        debug!("No rule matches {}", request_path);
        return None;
    };

    if !path.is_empty() && !is_valid_package_path(path) {
        debug!("Invalid package path '{}' for {}", path, host);
        return None;
    }

    let vcs_root = match rule {
        Rule::Exact { repo, .. } => repo.trim_end_matches('/').to_string(),
        Rule::Wildcard {
            prefix,
            repo_template,
            ..
        } => {
            let Some(project) = project_segment(&request_path, prefix) else {
                debug!("Wildcard rule {} matched {} without a project", rule, request_path);
                return None;
            };
            repo_template
                .replace(PLACEHOLDER, project)
                .trim_end_matches('/')
                .to_string()
        }
    };

    debug!("Resolved {} via {}", request_path, rule);

    Some(ImportMetadata {
        import_root: request_path,
        vcs: rule.vcs().to_string(),
        vcs_root,
        branch: rule.branch().to_string(),
    })
}

fn find_exact<'a>(request_path: &str, rules: &'a RuleSet) -> Option<&'a Rule> {
    rules.exact_rules().find(|rule| rule.pattern() == request_path)
}

fn find_wildcard<'a>(request_path: &str, rules: &'a RuleSet) -> Option<&'a Rule> {
    rules
        .wildcard_rules()
        .find(|rule| is_path_prefix(request_path, rule.pattern()))
}

/// Segment-aligned prefix check: `example.com` covers `example.com` and
/// `example.com/x`, but not `example.com.evil.net` or `example.community`.
fn is_path_prefix(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// First segment below the wildcard prefix, if any.
fn project_segment<'a>(request_path: &'a str, prefix: &str) -> Option<&'a str> {
    request_path
        .strip_prefix(prefix)?
        .trim_start_matches('/')
        .split('/')
        .next()
        .filter(|segment| !segment.is_empty())
}

/// Strip a port, a trailing dot and letter case from a `Host` value.
///
/// Returns an empty string when the remaining name is not a plain DNS name or
/// bracketed IPv6 literal, so a header can never smuggle path segments.
pub fn normalize_host(host: &str) -> String {
    let host = host.trim();
    let host = if host.starts_with('[') {
        // IPv6 literal, keep brackets and drop the port
        match host.find(']') {
            Some(end) => &host[..=end],
            None => host,
        }
    } else {
        match host.rsplit_once(':') {
            Some((name, port)) if port.bytes().all(|b| b.is_ascii_digit()) => name,
            _ => host,
        }
    };
    let host = host.trim_end_matches('.').to_ascii_lowercase();
    if is_valid_host(&host) { host } else { String::new() }
}

/// Non-empty DNS name made of `[a-z0-9.-]`, or a bracketed IPv6 literal.
fn is_valid_host(host: &str) -> bool {
    if let Some(inner) = host.strip_prefix('[').and_then(|h| h.strip_suffix(']')) {
        return !inner.is_empty()
            && inner
                .bytes()
                .all(|b| b.is_ascii_hexdigit() || matches!(b, b':' | b'.'));
    }
    !host.is_empty()
        && host
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'.' | b'-'))
}

/// Strip leading and trailing separators; a separator-only path becomes empty.
pub fn normalize_path(path: &str) -> &str {
    path.trim_matches('/')
}
