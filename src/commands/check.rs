use crate::rule::{Rule, RuleSet};

/// One line per rule, in the order they are tried within their kind.
pub fn describe_rules(rules: &RuleSet) -> Vec<String> {
    rules.iter().enumerate().map(|(i, rule)| describe_rule(i, rule)).collect()
}

fn describe_rule(index: usize, rule: &Rule) -> String {
    let kind = if rule.is_wildcard() { "wildcard" } else { "exact" };
    format!(
        "{:>3}. {:<8} {} ({}, {})",
        index + 1,
        kind,
        rule,
        rule.vcs(),
        rule.branch()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::RuleEntry;

    #[test]
    fn test_describe_rules() {
        let rules = RuleSet::from_entries(vec![
            RuleEntry {
                path: "example.com".into(),
                repo_path: "https://git.example.com/root.git".into(),
                ..Default::default()
            },
            RuleEntry {
                path: "example.com/*".into(),
                repo_path: "https://hg.example.com/*".into(),
                vcs: Some("hg".into()),
                branch: Some("default".into()),
            },
        ])
        .unwrap();

        let lines = describe_rules(&rules);
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "  1. exact    example.com -> https://git.example.com/root.git (git, main)"
        );
        assert_eq!(
            lines[1],
            "  2. wildcard example.com/* -> https://hg.example.com/* (hg, default)"
        );
    }

    #[test]
    fn test_describe_no_rules() {
        assert!(describe_rules(&RuleSet::default()).is_empty());
    }
}
