//! thailint: a multi-language static analysis linter. Library-first (spec.md §1: "library-first
//! (embeddable) with a thin CLI wrapper"), mirroring `original_source/src/__init__.py`'s exported
//! surface (`Linter`, `load_config`, `ConfigError`) per spec.md §6/SPEC_FULL.md §2.

pub mod analyzers;
pub mod config;
pub mod dry;
pub mod formatter;
pub mod ignore;
pub mod lint_context;
pub mod orchestrator;
pub mod registry;
pub mod rule;
pub mod rules;
pub mod violation;

pub use config::{load_config, Config, ConfigError, ConfigParseError};
pub use lint_context::LintContext;
pub use rule::Rule;
pub use violation::{Severity, Violation};

use std::path::{Path, PathBuf};

/// The library's single embeddable entry point (spec.md §6: "Library API ... `Linter(config_file?,
/// project_root?)`, `lint(path, rules?) -> [Violation]`"). Construct once, call `lint` as many
/// times as needed; config is resolved fresh on each call from `path`'s ancestry, unless an
/// explicit `config_file` was supplied at construction.
#[derive(Debug, Clone, Default)]
pub struct Linter {
    rule_prefixes: Option<Vec<String>>,
    config_file: Option<PathBuf>,
}

impl Linter {
    pub fn new() -> Self {
        Self { rule_prefixes: None, config_file: None }
    }

    /// Restricts every subsequent `lint` call to rules whose `rule_id` matches one of
    /// `prefixes` (spec.md §6: "direct rule entry points"; this is the general form).
    pub fn with_rules(prefixes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            rule_prefixes: Some(prefixes.into_iter().map(Into::into).collect()),
            config_file: None,
        }
    }

    /// Pins the config file rather than discovering it by ancestor search (spec.md §4.4:
    /// "explicit `config_file` argument wins").
    pub fn with_config_file(mut self, config_file: impl Into<PathBuf>) -> Self {
        self.config_file = Some(config_file.into());
        self
    }

    pub fn lint(&self, path: &Path) -> Vec<Violation> {
        match &self.config_file {
            Some(config_file) => {
                let config = load_config(path, Some(config_file)).unwrap_or_default();
                orchestrator::lint_with_config(path, &config, self.rule_prefixes.as_deref())
            }
            None => orchestrator::lint(path, self.rule_prefixes.as_deref()),
        }
    }
}

/// `nesting_lint(path, max_depth?) -> [Violation]` (spec.md §6): a direct rule entry point
/// that builds a minimal one-rule run internally rather than requiring a full `Linter`.
pub fn nesting_lint(path: &Path, max_depth: Option<usize>) -> Vec<Violation> {
    single_rule_lint(path, "nesting", max_depth.map(|d| ("max_depth", d as i64)))
}

pub fn srp_lint(path: &Path, max_methods: Option<usize>) -> Vec<Violation> {
    single_rule_lint(path, "srp", max_methods.map(|d| ("max_methods", d as i64)))
}

pub fn dry_lint(path: &Path, min_duplicate_lines: Option<usize>) -> Vec<Violation> {
    single_rule_lint(path, "dry", min_duplicate_lines.map(|d| ("min_duplicate_lines", d as i64)))
}

pub fn magic_numbers_lint(path: &Path) -> Vec<Violation> {
    single_rule_lint(path, "magic_numbers", None)
}

pub fn stringly_typed_lint(path: &Path, min_occurrences: Option<usize>) -> Vec<Violation> {
    single_rule_lint(path, "stringly_typed", min_occurrences.map(|d| ("min_occurrences", d as i64)))
}

pub fn file_placement_lint(path: &Path) -> Vec<Violation> {
    single_rule_lint(path, "file-placement", None)
}

fn single_rule_lint(path: &Path, category: &str, override_field: Option<(&str, i64)>) -> Vec<Violation> {
    let mut config = load_config(path, None).unwrap_or_default();
    if let Some((field, value)) = override_field {
        let mut section: config::RuleSection = config.rule_section(category).cloned().unwrap_or_default();
        section.values.insert(serde_yml::Value::String(field.to_string()), serde_yml::Value::from(value));
        config.rules.insert(category.to_string(), section);
    }
    let prefixes = vec![category.to_string()];
    orchestrator::lint_with_config(path, &config, Some(&prefixes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn linter_runs_every_rule_by_default() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.py"), "timeout = 4321\n").unwrap();
        let violations = Linter::new().lint(&tmp.path().join("a.py"));
        assert!(violations.iter().any(|v| v.rule_id == "magic_numbers"));
    }

    #[test]
    fn direct_entry_point_runs_only_its_rule() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.py"), "timeout = 4321\n").unwrap();
        let violations = magic_numbers_lint(&tmp.path().join("a.py"));
        assert!(violations.iter().all(|v| v.rule_id == "magic_numbers"));
        assert!(!violations.is_empty());
    }

    #[test]
    fn nesting_lint_accepts_a_max_depth_override() {
        let tmp = TempDir::new().unwrap();
        let src = "def f():\n    if True:\n        for x in y:\n            pass\n";
        fs::write(tmp.path().join("a.py"), src).unwrap();
        let violations = nesting_lint(&tmp.path().join("a.py"), Some(1));
        assert!(violations.iter().any(|v| v.rule_id == "nesting.excessive-depth"));
    }
}
