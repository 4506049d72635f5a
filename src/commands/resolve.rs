use anyhow::{Result, bail};
use log::debug;

use crate::{
    render::go_import_content,
    resolver::{ImportMetadata, resolve},
    rule::RuleSet,
};

use super::import_path::ImportPath;

/// Resolve an import path offline and describe the result.
#[tracing::instrument(skip(rules))]
pub fn resolve_import(rules: &RuleSet, import_path: &str, json: bool) -> Result<String> {
    let target = import_path.parse::<ImportPath>()?;
    debug!("Resolving {} against {} rule(s)", target, rules.len());

    let Some(meta) = resolve(&target.host, &target.path, rules) else {
        bail!("Not found: {}", target);
    };

    if json {
        Ok(serde_json::to_string_pretty(&meta)?)
    } else {
        Ok(describe(&meta))
    }
}

fn describe(meta: &ImportMetadata) -> String {
    format!(
        "go-import: {}\nbranch: {}",
        go_import_content(meta),
        meta.branch
    )
}
