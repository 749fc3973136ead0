//! The universal result record produced by every rule.
//!
//! Grounded in `rumdl`'s `rule.rs` `LintWarning`/`LintError` shape
//! (`crate::rule::{LintWarning, Severity}` as used throughout
//! `examples/sthagen-rvben-rumdl/src/rules/md009_trailing_spaces.rs`), generalized from a
//! Markdown-only warning to the cross-language `Violation` record in spec.md §3.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Severity of a violation. Ordered so that `Error > Warning > Info` for sorting/reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Default for Severity {
    fn default() -> Self {
        Severity::Warning
    }
}

/// A single, immutable lint finding.
///
/// `rule_id` is of the form `<category>.<kind>` (e.g. `dry.duplicate-code`), `file_path`
/// is project-relative, `line` is 1-indexed and `column` is 0-indexed, matching spec.md §3.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    pub rule_id: String,
    pub file_path: String,
    pub line: usize,
    pub column: usize,
    pub message: String,
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_end: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_end: Option<usize>,
}

impl Violation {
    pub fn new(
        rule_id: impl Into<String>,
        file_path: impl Into<String>,
        line: usize,
        column: usize,
        message: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self {
            rule_id: rule_id.into(),
            file_path: file_path.into(),
            line,
            column,
            message: message.into(),
            severity,
            suggestion: None,
            column_end: None,
            line_end: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn with_end(mut self, line_end: usize, column_end: usize) -> Self {
        self.line_end = Some(line_end);
        self.column_end = Some(column_end);
        self
    }

    /// Sort key used by the orchestrator: `(line, column, rule_id)`, per spec.md §5
    /// ("Violations within one file are ordered by (line, column, rule_id)").
    fn sort_key(&self) -> (usize, usize, &str) {
        (self.line, self.column, self.rule_id.as_str())
    }
}

/// Orders violations the way the orchestrator must emit them: by `(line, column, rule_id)`.
pub fn sort_violations(violations: &mut [Violation]) {
    violations.sort_by(|a, b| compare_violations(a, b));
}

fn compare_violations(a: &Violation, b: &Violation) -> Ordering {
    a.sort_key().cmp(&b.sort_key())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn violation_round_trips_through_json() {
        let v = Violation::new("dry.duplicate-code", "src/foo.py", 10, 4, "duplicate block", Severity::Warning)
            .with_suggestion("extract a helper")
            .with_end(12, 0);
        let json = serde_json::to_string(&v).unwrap();
        let back: Violation = serde_json::from_str(&json).unwrap();
        assert_eq!(v, back);
    }

    #[test]
    fn sort_orders_by_line_then_column_then_rule_id() {
        let mut vs = vec![
            Violation::new("b.rule", "f", 2, 0, "m", Severity::Warning),
            Violation::new("a.rule", "f", 1, 5, "m", Severity::Warning),
            Violation::new("a.rule", "f", 1, 2, "m", Severity::Warning),
        ];
        sort_violations(&mut vs);
        assert_eq!(
            vs.iter().map(|v| (v.line, v.column)).collect::<Vec<_>>(),
            vec![(1, 2), (1, 5), (2, 0)]
        );
    }

    #[test]
    fn severity_orders_error_above_warning_above_info() {
        assert!(Severity::Error > Severity::Warning);
        assert!(Severity::Warning > Severity::Info);
    }
}
