//! `file-placement` (spec.md §4.8): per-path directory-scoped allow/deny rules, longest
//! matching directory prefix wins, `deny` takes precedence over `allow` within that match.
//! Falls back to `global_patterns`/`global_deny` when no directory rule matches a path.
//!
//! Grounded in `examples/original_source/src/linters/file_placement/rule_checker.py`'s
//! `check_all_rules` (directory rules checked first, `global_deny` then `global_patterns`
//! as the fallback) and `_check_directory_rules` (deny checked, and returned on, before
//! allow within one directory's rule).

use crate::analyzers::Language;
use crate::lint_context::LintContext;
use crate::rule::Rule;
use crate::violation::{Severity, Violation};
use regex::Regex;

const RULE_ID: &str = "file-placement";

#[derive(Debug, Clone, Default)]
pub struct FilePlacementRule;

impl Rule for FilePlacementRule {
    fn rule_id(&self) -> &'static str {
        RULE_ID
    }

    fn description(&self) -> &'static str {
        "files should live where the project's directory placement rules say they belong"
    }

    fn languages(&self) -> &'static [Language] {
        &[
            Language::Python,
            Language::TypeScript,
            Language::JavaScript,
            Language::Bash,
            Language::Markdown,
            Language::Css,
            Language::Other,
        ]
    }

    fn check(&mut self, ctx: &LintContext) -> Vec<Violation> {
        let Some(section) = ctx.rule_config("file-placement") else { return Vec::new() };
        let path = ctx.file_path.replace('\\', "/");

        if let Some(rule) = longest_matching_directory_rule(section, &path) {
            return match_rule(&rule, &path, &ctx.file_path).into_iter().collect();
        }

        if let Some(deny) = section.get("global_deny").and_then(|v| v.as_sequence()) {
            if let Some(v) = check_deny_patterns(deny, &path, &ctx.file_path) {
                return vec![v];
            }
        }

        if let Some(global) = section.get("global_patterns") {
            let rule = DirRule::from_value(global);
            return match_rule(&rule, &path, &ctx.file_path).into_iter().collect();
        }

        Vec::new()
    }
}

struct DirRule {
    allow: Vec<String>,
    deny: Vec<(String, Option<String>)>,
}

impl DirRule {
    fn from_value(value: &serde_yml::Value) -> Self {
        let allow = value
            .get("allow")
            .and_then(|v| v.as_sequence())
            .map(|seq| seq.iter().filter_map(|v| v.as_str()).map(str::to_string).collect())
            .unwrap_or_default();
        let deny = value
            .get("deny")
            .and_then(|v| v.as_sequence())
            .map(|seq| seq.iter().filter_map(deny_entry).collect())
            .unwrap_or_default();
        Self { allow, deny }
    }
}

fn deny_entry(v: &serde_yml::Value) -> Option<(String, Option<String>)> {
    if let Some(s) = v.as_str() {
        return Some((s.to_string(), None));
    }
    let pattern = v.get("pattern")?.as_str()?.to_string();
    let reason = v.get("reason").and_then(|r| r.as_str()).map(str::to_string);
    Some((pattern, reason))
}

/// Finds the `directories` entry whose key is the longest prefix of `path` ("longest matching
/// directory prefix wins", spec.md §4.8).
fn longest_matching_directory_rule(section: &serde_yml::Value, path: &str) -> Option<DirRule> {
    let directories = section.get("directories")?.as_mapping()?;
    let mut best: Option<(&str, &serde_yml::Value)> = None;
    for (key, rule) in directories {
        let Some(prefix) = key.as_str() else { continue };
        if path == prefix || path.starts_with(&format!("{prefix}/")) {
            if best.is_none_or(|(b, _)| prefix.len() > b.len()) {
                best = Some((prefix, rule));
            }
        }
    }
    best.map(|(_, rule)| DirRule::from_value(rule))
}

fn check_deny_patterns(deny: &[serde_yml::Value], path: &str, file_path: &str) -> Option<Violation> {
    for entry in deny {
        let (pattern, reason) = deny_entry(entry)?;
        if regex_matches(&pattern, path) {
            return Some(deny_violation(file_path, &pattern, reason.as_deref()));
        }
    }
    None
}

fn match_rule(rule: &DirRule, path: &str, file_path: &str) -> Option<Violation> {
    for (pattern, reason) in &rule.deny {
        if regex_matches(pattern, path) {
            return Some(deny_violation(file_path, pattern, reason.as_deref()));
        }
    }
    if !rule.allow.is_empty() && !rule.allow.iter().any(|p| regex_matches(p, path)) {
        return Some(
            Violation::new(
                RULE_ID,
                file_path,
                1,
                0,
                format!("file does not match any allowed pattern for its directory: {}", rule.allow.join(", ")),
                Severity::Error,
            )
            .with_suggestion("move the file or adjust the directory's allow patterns"),
        );
    }
    None
}

fn deny_violation(file_path: &str, pattern: &str, reason: Option<&str>) -> Violation {
    let message = match reason {
        Some(r) => format!("file is denied by pattern '{pattern}': {r}"),
        None => format!("file is denied by pattern '{pattern}'"),
    };
    Violation::new(RULE_ID, file_path, 1, 0, message, Severity::Error).with_suggestion("move the file out of this location")
}

fn regex_matches(pattern: &str, path: &str) -> bool {
    Regex::new(pattern).is_ok_and(|re| re.is_match(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn ctx(path: &str, yaml: &str) -> LintContext {
        let mut map = HashMap::new();
        map.insert("file-placement".to_string(), serde_yml::from_str(yaml).unwrap());
        LintContext::new(path, Language::Other, String::new(), map)
    }

    #[test]
    fn deny_wins_over_allow_in_same_directory_rule() {
        let yaml = "directories:\n  src/legacy:\n    allow: [\".*\\\\.py$\"]\n    deny: [\".*\\\\.py$\"]\n";
        let c = ctx("src/legacy/foo.py", yaml);
        let mut rule = FilePlacementRule;
        let violations = rule.check(&c);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("denied"));
    }

    #[test]
    fn longest_directory_prefix_wins() {
        let yaml = "directories:\n  src:\n    deny: [\".*\\\\.py$\"]\n  src/allowed:\n    allow: [\".*\\\\.py$\"]\n";
        let c = ctx("src/allowed/foo.py", yaml);
        let mut rule = FilePlacementRule;
        assert!(rule.check(&c).is_empty());
    }

    #[test]
    fn file_must_match_at_least_one_allow_pattern() {
        let yaml = "directories:\n  src:\n    allow: [\".*\\\\.rs$\"]\n";
        let c = ctx("src/foo.py", yaml);
        let mut rule = FilePlacementRule;
        assert_eq!(rule.check(&c).len(), 1);
    }

    #[test]
    fn falls_back_to_global_deny_when_no_directory_matches() {
        let yaml = "global_deny:\n  - pattern: \".*\\\\.tmp$\"\n    reason: \"scratch files must not be committed\"\n";
        let c = ctx("notes.tmp", yaml);
        let mut rule = FilePlacementRule;
        let violations = rule.check(&c);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("scratch files"));
    }

    #[test]
    fn unmatched_path_with_no_fallback_rule_is_clean() {
        let yaml = "directories:\n  src:\n    deny: [\".*\\\\.py$\"]\n";
        let c = ctx("docs/readme.md", yaml);
        let mut rule = FilePlacementRule;
        assert!(rule.check(&c).is_empty());
    }
}
