//! `file_header` (spec.md §4.8): language-dispatched header extraction — Python module
//! docstring, TypeScript/JavaScript/CSS leading JSDoc, Bash shebang-then-comment block,
//! Markdown YAML frontmatter — followed by `Field: value` parsing, mandatory-field
//! validation, and "atemporal language" pattern flagging in field values.
//!
//! Grounded in the per-language header accessors already exposed by the analyzers
//! (`PythonTree` module docstring, `TsTree::leading_jsdoc`, `BashTree::leading_comment_block`,
//! `MarkdownTree::frontmatter`, `CssTree::leading_jsdoc`), added to those modules for this rule.

use crate::analyzers::{Language, Tree};
use crate::lint_context::LintContext;
use crate::rule::Rule;
use crate::violation::{Severity, Violation};
use once_cell::sync::Lazy;
use regex::Regex;
use rustpython_ast::Stmt;

const RULE_ID: &str = "file_header";

#[derive(Debug, Clone, Default)]
pub struct FileHeaderRule;

impl Rule for FileHeaderRule {
    fn rule_id(&self) -> &'static str {
        RULE_ID
    }

    fn description(&self) -> &'static str {
        "header comment blocks should carry required fields and avoid language that goes stale"
    }

    fn languages(&self) -> &'static [Language] {
        &[
            Language::Python,
            Language::TypeScript,
            Language::JavaScript,
            Language::Bash,
            Language::Markdown,
            Language::Css,
        ]
    }

    fn check(&mut self, ctx: &LintContext) -> Vec<Violation> {
        let required_fields = required_fields(ctx);
        let extra_ignores = extra_ignore_patterns(ctx);

        let Some(header) = extract_header(ctx) else {
            return if required_fields.is_empty() {
                Vec::new()
            } else {
                vec![missing_header_violation(&ctx.file_path, &required_fields)]
            };
        };

        let mut out = Vec::new();
        let fields = parse_fields(&header);

        for required in &required_fields {
            if !fields.iter().any(|(k, _, _)| k.eq_ignore_ascii_case(required)) {
                out.push(
                    Violation::new(
                        RULE_ID,
                        &ctx.file_path,
                        1,
                        0,
                        format!("header is missing required field '{required}'"),
                        Severity::Warning,
                    )
                    .with_suggestion(format!("add a '{required}:' line to the file header")),
                );
            }
        }

        for (key, value, line) in &fields {
            if key.eq_ignore_ascii_case("created") || key.eq_ignore_ascii_case("updated") {
                if !is_ignored(&format!("{key}: {value}"), &extra_ignores) {
                    out.push(atemporal_violation(&ctx.file_path, *line, "explicit date field", key));
                }
                continue;
            }
            if let Some(kind) = atemporal_pattern(value) {
                if !is_ignored(value, &extra_ignores) {
                    out.push(atemporal_violation(&ctx.file_path, *line, kind, value));
                }
            }
        }
        out
    }
}

fn missing_header_violation(file_path: &str, required_fields: &[String]) -> Violation {
    Violation::new(
        RULE_ID,
        file_path,
        1,
        0,
        format!("file has no recognizable header block; missing required fields: {}", required_fields.join(", ")),
        Severity::Warning,
    )
    .with_suggestion("add a header comment block with the required fields")
}

fn required_fields(ctx: &LintContext) -> Vec<String> {
    ctx.rule_config("file_header")
        .and_then(|v| v.get("required_fields"))
        .and_then(|v| v.as_sequence())
        .map(|seq| seq.iter().filter_map(|v| v.as_str()).map(str::to_string).collect())
        .unwrap_or_default()
}

fn extra_ignore_patterns(ctx: &LintContext) -> Vec<Regex> {
    ctx.rule_config("file_header")
        .and_then(|v| v.get("ignore"))
        .and_then(|v| v.as_sequence())
        .map(|seq| seq.iter().filter_map(|v| v.as_str()).filter_map(|p| Regex::new(p).ok()).collect())
        .unwrap_or_default()
}

fn is_ignored(text: &str, patterns: &[Regex]) -> bool {
    patterns.iter().any(|p| p.is_match(text))
}

/// Header text as raw lines, language-dispatched per spec.md §4.8's extraction conventions.
fn extract_header(ctx: &LintContext) -> Option<Vec<String>> {
    match ctx.ast().ok()? {
        Tree::Python(py) => module_docstring(&py.module).map(|s| s.lines().map(str::to_string).collect()),
        Tree::TypeScript(ts) => ts.leading_jsdoc().map(|s| strip_jsdoc(&s)),
        Tree::Bash(bash) => {
            let lines = bash.leading_comment_block();
            if lines.is_empty() {
                None
            } else {
                Some(lines)
            }
        }
        Tree::Markdown(md) => md.frontmatter().map(|s| s.lines().map(str::to_string).collect()),
        Tree::Css(css) => css.leading_jsdoc().map(|s| strip_jsdoc(&s)),
        Tree::None => None,
    }
}

fn module_docstring(module: &[Stmt]) -> Option<&str> {
    let Stmt::Expr(e) = module.first()? else { return None };
    let rustpython_ast::Expr::Constant(c) = e.value.as_ref() else { return None };
    match &c.value {
        rustpython_ast::Constant::Str(s) => Some(s.as_str()),
        _ => None,
    }
}

fn strip_jsdoc(text: &str) -> Vec<String> {
    text.trim_start_matches("/**")
        .trim_end_matches("*/")
        .lines()
        .map(|l| l.trim().trim_start_matches('*').trim().to_string())
        .filter(|l| !l.is_empty())
        .collect()
}

static FIELD_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([A-Za-z][A-Za-z0-9 _-]*)\s*:\s*(.+)$").unwrap());

/// `Field: value` pairs found anywhere in the header block, 1-indexed relative to the header.
fn parse_fields(header: &[String]) -> Vec<(String, String, usize)> {
    header
        .iter()
        .enumerate()
        .filter_map(|(i, line)| FIELD_LINE.captures(line.trim()).map(|c| (c[1].trim().to_string(), c[2].trim().to_string(), i + 1)))
        .collect()
}

static ISO_DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d{4}-\d{2}-\d{2}\b").unwrap());
static MONTH_YEAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(january|february|march|april|may|june|july|august|september|october|november|december)\.?\s+\d{4}\b").unwrap()
});
static TEMPORAL_QUALIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b(currently|now|recently|soon)\b").unwrap());
static STATE_CHANGE_VERB: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(replaces|migrated from|new|old)\b").unwrap());
static FUTURE_REFERENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(will be|planned)").unwrap());

fn atemporal_pattern(value: &str) -> Option<&'static str> {
    if ISO_DATE.is_match(value) || MONTH_YEAR.is_match(value) {
        Some("explicit date")
    } else if TEMPORAL_QUALIFIER.is_match(value) {
        Some("temporal qualifier")
    } else if STATE_CHANGE_VERB.is_match(value) {
        Some("state-change verb")
    } else if FUTURE_REFERENCE.is_match(value) {
        Some("future reference")
    } else {
        None
    }
}

fn atemporal_violation(file_path: &str, line: usize, kind: &str, text: &str) -> Violation {
    Violation::new(
        RULE_ID,
        file_path,
        line.max(1),
        0,
        format!("header uses a {kind} ('{text}') that will go stale"),
        Severity::Info,
    )
    .with_suggestion("describe the current state without dates, qualifiers, or before/after language")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(yaml: &str) -> HashMap<String, serde_yml::Value> {
        let mut map = HashMap::new();
        map.insert("file_header".to_string(), serde_yml::from_str(yaml).unwrap());
        map
    }

    #[test]
    fn flags_missing_required_field() {
        let src = "\"\"\"Purpose: demo\n\"\"\"\nx = 1\n";
        let ctx = LintContext::new("a.py", Language::Python, src.to_string(), config("required_fields: [Purpose, Author]"));
        let mut rule = FileHeaderRule;
        let violations = rule.check(&ctx);
        assert!(violations.iter().any(|v| v.message.contains("Author")));
    }

    #[test]
    fn satisfied_required_fields_are_not_flagged() {
        let src = "\"\"\"Purpose: demo\nAuthor: me\n\"\"\"\nx = 1\n";
        let ctx = LintContext::new("a.py", Language::Python, src.to_string(), config("required_fields: [Purpose, Author]"));
        let mut rule = FileHeaderRule;
        let violations = rule.check(&ctx);
        assert!(violations.iter().all(|v| !v.message.contains("missing")));
    }

    #[test]
    fn flags_created_field_as_explicit_date_marker() {
        let src = "\"\"\"Purpose: demo\nCreated: 2024-01-01\n\"\"\"\nx = 1\n";
        let ctx = LintContext::new("a.py", Language::Python, src.to_string(), HashMap::new());
        let mut rule = FileHeaderRule;
        let violations = rule.check(&ctx);
        assert!(violations.iter().any(|v| v.message.contains("explicit date")));
    }

    #[test]
    fn flags_temporal_qualifier_in_field_value() {
        let src = "\"\"\"Purpose: currently handles auth\n\"\"\"\nx = 1\n";
        let ctx = LintContext::new("a.py", Language::Python, src.to_string(), HashMap::new());
        let mut rule = FileHeaderRule;
        let violations = rule.check(&ctx);
        assert!(violations.iter().any(|v| v.message.contains("temporal qualifier")));
    }

    #[test]
    fn bash_header_uses_shebang_stripped_comment_block() {
        let src = "#!/bin/bash\n# Purpose: demo\n# Author: me\necho hi\n";
        let ctx = LintContext::new("a.sh", Language::Bash, src.to_string(), config("required_fields: [Purpose]"));
        let mut rule = FileHeaderRule;
        assert!(rule.check(&ctx).is_empty());
    }

    #[test]
    fn markdown_header_reads_yaml_frontmatter() {
        let src = "---\nPurpose: demo\n---\n\n# Body\n";
        let ctx = LintContext::new("a.md", Language::Markdown, src.to_string(), config("required_fields: [Purpose]"));
        let mut rule = FileHeaderRule;
        assert!(rule.check(&ctx).is_empty());
    }
}
