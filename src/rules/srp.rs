//! `srp.violation` (spec.md §4.8): flags classes whose method count or LOC exceeds a
//! configured maximum, or whose name contains a configured "god object" keyword (`Manager`,
//! `Helper`, `Utility`, ...).

use crate::analyzers::{Language, Tree};
use crate::lint_context::LintContext;
use crate::rule::Rule;
use crate::violation::{Severity, Violation};

const RULE_ID: &str = "srp.violation";
const DEFAULT_MAX_METHODS: usize = 7;
const DEFAULT_MAX_LOC: usize = 200;
const DEFAULT_KEYWORDS: &[&str] = &["Manager", "Helper", "Utility"];

#[derive(Debug, Clone, Default)]
pub struct SrpRule;

impl Rule for SrpRule {
    fn rule_id(&self) -> &'static str {
        RULE_ID
    }

    fn description(&self) -> &'static str {
        "classes should have a single responsibility: bounded method count, LOC, and naming"
    }

    fn languages(&self) -> &'static [Language] {
        &[Language::Python, Language::TypeScript, Language::JavaScript]
    }

    fn check(&mut self, ctx: &LintContext) -> Vec<Violation> {
        let (max_methods, max_loc, keywords) = resolve_config(ctx);
        let Ok(tree) = ctx.ast() else { return Vec::new() };

        match tree {
            Tree::Python(py) => py
                .classes()
                .into_iter()
                .filter_map(|c| {
                    let method_count = c.body.iter().filter(|s| is_method(s)).count();
                    let loc = c.end_line.saturating_sub(c.line) + 1;
                    let reason = violation_reason(&c.name, method_count, loc, max_methods, max_loc, &keywords);
                    reason.map(|r| violation(&ctx.file_path, c.line, &c.name, &r))
                })
                .collect(),
            Tree::TypeScript(ts) => ts
                .classes()
                .into_iter()
                .filter_map(|c| {
                    let reason =
                        violation_reason(&c.name, c.method_count, usize::MIN, max_methods, usize::MAX, &keywords);
                    reason.map(|r| violation(&ctx.file_path, c.line, &c.name, &r))
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}

fn is_method(stmt: &rustpython_ast::Stmt) -> bool {
    matches!(stmt, rustpython_ast::Stmt::FunctionDef(_) | rustpython_ast::Stmt::AsyncFunctionDef(_))
}

fn violation_reason(
    name: &str,
    method_count: usize,
    loc: usize,
    max_methods: usize,
    max_loc: usize,
    keywords: &[String],
) -> Option<String> {
    let mut reasons = Vec::new();
    if method_count > max_methods {
        reasons.push(format!("{method_count} methods exceeds the maximum of {max_methods}"));
    }
    if loc > max_loc {
        reasons.push(format!("{loc} lines exceeds the maximum of {max_loc}"));
    }
    if let Some(kw) = keywords.iter().find(|kw| name.contains(kw.as_str())) {
        reasons.push(format!("name contains the god-object keyword '{kw}'"));
    }
    (!reasons.is_empty()).then(|| reasons.join("; "))
}

fn violation(file_path: &str, line: usize, name: &str, reason: &str) -> Violation {
    Violation::new(
        RULE_ID,
        file_path,
        line,
        0,
        format!("class '{name}' violates single responsibility: {reason}"),
        Severity::Warning,
    )
    .with_suggestion("split responsibilities into smaller, focused classes")
}

fn resolve_config(ctx: &LintContext) -> (usize, usize, Vec<String>) {
    let section = ctx.rule_config("srp");
    let max_methods = section
        .and_then(|v| v.get("max_methods"))
        .and_then(|v| v.as_u64())
        .map(|v| v as usize)
        .unwrap_or(DEFAULT_MAX_METHODS);
    let max_loc = section
        .and_then(|v| v.get("max_loc"))
        .and_then(|v| v.as_u64())
        .map(|v| v as usize)
        .unwrap_or(DEFAULT_MAX_LOC);
    let keywords = section
        .and_then(|v| v.get("keywords"))
        .and_then(|v| v.as_sequence())
        .map(|seq| seq.iter().filter_map(|v| v.as_str().map(str::to_string)).collect())
        .unwrap_or_else(|| DEFAULT_KEYWORDS.iter().map(|s| s.to_string()).collect());
    (max_methods, max_loc, keywords)
}
