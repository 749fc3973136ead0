//! `magic_numbers` (spec.md §4.8): flags numeric literals outside a default allowlist that
//! aren't assigned to an UPPERCASE name and aren't in a recognized benign context.

use crate::analyzers::Language;
use crate::lint_context::LintContext;
use crate::rule::Rule;
use crate::violation::{Severity, Violation};
use once_cell::sync::Lazy;
use regex::Regex;

const RULE_ID: &str = "magic_numbers";
const DEFAULT_ALLOWED_INTS: &[i64] = &[-1, 0, 1, 2, 3, 4, 5, 10, 100, 1000];
const DEFAULT_ALLOWED_PORTS: &[i64] = &[21, 22, 80, 443, 3000, 5000, 8080, 8443];

#[derive(Debug, Clone, Default)]
pub struct MagicNumbersRule;

impl Rule for MagicNumbersRule {
    fn rule_id(&self) -> &'static str {
        RULE_ID
    }

    fn description(&self) -> &'static str {
        "unnamed numeric literals should be bound to a descriptively-named constant"
    }

    fn languages(&self) -> &'static [Language] {
        &[Language::Python, Language::TypeScript, Language::JavaScript]
    }

    fn check(&mut self, ctx: &LintContext) -> Vec<Violation> {
        let max_small_integer = ctx
            .rule_config("magic_numbers")
            .and_then(|v| v.get("max_small_integer"))
            .and_then(|v| v.as_i64())
            .unwrap_or(10);

        let mut out = Vec::new();
        for (idx, line) in ctx.raw_lines().iter().enumerate() {
            for m in NUMBER.find_iter(line) {
                let Ok(value) = m.as_str().parse::<i64>() else { continue };
                if is_allowed(value, line, m.start(), m.end(), max_small_integer) {
                    continue;
                }
                out.push(
                    Violation::new(
                        RULE_ID,
                        &ctx.file_path,
                        idx + 1,
                        m.start(),
                        format!("magic number {value} should be a named constant"),
                        Severity::Info,
                    )
                    .with_suggestion("bind the literal to an UPPER_SNAKE_CASE constant"),
                );
            }
        }
        out
    }
}

static NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"-?\b\d+\b").unwrap());
static UPPER_ASSIGN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*[A-Z][A-Z0-9_]*\s*(?::[^=]+)?=\s*").unwrap());
static RANGE_CALL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\brange\s*\(\s*$").unwrap());

fn is_allowed(value: i64, line: &str, start: usize, end: usize, max_small_integer: i64) -> bool {
    if DEFAULT_ALLOWED_INTS.contains(&value) || DEFAULT_ALLOWED_PORTS.contains(&value) {
        return true;
    }
    if UPPER_ASSIGN.is_match(line) {
        return true;
    }
    let before = &line[..start];
    if RANGE_CALL.is_match(before) && value <= max_small_integer {
        return true;
    }
    // String repetition multiplier: `"x" * 3` or `3 * "x"`.
    let after = line[end..].trim_start();
    if after.starts_with('*') && (after.contains('\'') || after.contains('"')) {
        return true;
    }
    if before.trim_end().ends_with('*') && (before.contains('\'') || before.contains('"')) {
        return true;
    }
    false
}
