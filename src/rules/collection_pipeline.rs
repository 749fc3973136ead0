//! `collection-pipeline.embedded-filter` (spec.md §4.8): flags Python `for` loops whose body
//! is better expressed as a comprehension/`filter`/`map`/`any`/`all` pipeline — guard-then-work
//! loops, any/all-style terminal-boolean loops, filter-map-into-accumulator loops.

use crate::analyzers::{Language, Tree};
use crate::lint_context::LintContext;
use crate::rule::Rule;
use crate::violation::{Severity, Violation};
use rustpython_ast::{Expr, Stmt};

const RULE_ID: &str = "collection-pipeline.embedded-filter";

#[derive(Debug, Clone, Default)]
pub struct CollectionPipelineRule;

impl Rule for CollectionPipelineRule {
    fn rule_id(&self) -> &'static str {
        RULE_ID
    }

    fn description(&self) -> &'static str {
        "loops that filter, transform, or test a collection should use a pipeline expression"
    }

    fn languages(&self) -> &'static [Language] {
        &[Language::Python]
    }

    fn check(&mut self, ctx: &LintContext) -> Vec<Violation> {
        let Ok(Tree::Python(py)) = ctx.ast() else { return Vec::new() };
        let mut out = Vec::new();
        for f in py.functions() {
            walk(f.body, &ctx.file_content, &ctx.file_path, &mut out);
        }
        out
    }
}

fn walk(body: &[Stmt], source: &str, file_path: &str, out: &mut Vec<Violation>) {
    for stmt in body {
        if let Stmt::For(loop_stmt) = stmt {
            if let Some(kind) = classify_loop(&loop_stmt.body) {
                out.push(violation(file_path, line_of(stmt, source), kind));
            }
            walk(&loop_stmt.body, source, file_path, out);
        } else {
            for nested in crate::analyzers::python::nested_bodies(stmt) {
                walk(nested, source, file_path, out);
            }
        }
    }
}

fn line_of(stmt: &Stmt, source: &str) -> usize {
    use rustpython_ast::Ranged;
    crate::analyzers::python::line_for_offset(source, stmt.range().start().to_usize())
}

/// Recognizes three embedded-pipeline shapes in a loop body: guard-then-work (`if ...: continue`
/// followed by one statement), terminal any/all (single `if` that `return`s a bool literal), and
/// filter-map-into-accumulator (conditional `list.append(transform(x))`).
fn classify_loop(body: &[Stmt]) -> Option<&'static str> {
    if is_guard_then_work(body) {
        return Some("guard-then-work");
    }
    if is_any_all_terminal(body) {
        return Some("any-all");
    }
    if is_filter_map_accumulator(body) {
        return Some("filter-map");
    }
    None
}

fn is_guard_then_work(body: &[Stmt]) -> bool {
    let [Stmt::If(guard), rest @ ..] = body else { return false };
    !rest.is_empty() && guard.body.len() == 1 && matches!(guard.body[0], Stmt::Continue(_)) && guard.orelse.is_empty()
}

fn is_any_all_terminal(body: &[Stmt]) -> bool {
    let [Stmt::If(s)] = body else { return false };
    s.body.len() == 1 && matches!(&s.body[0], Stmt::Return(r) if is_bool_literal(r.value.as_deref()))
}

fn is_bool_literal(expr: Option<&Expr>) -> bool {
    matches!(expr, Some(Expr::Constant(c)) if matches!(c.value, rustpython_ast::Constant::Bool(_)))
}

fn is_filter_map_accumulator(body: &[Stmt]) -> bool {
    let [Stmt::If(guard)] = body else { return false };
    guard.body.len() == 1 && is_append_call(&guard.body[0])
}

fn is_append_call(stmt: &Stmt) -> bool {
    let Stmt::Expr(e) = stmt else { return false };
    matches!(e.value.as_ref(), Expr::Call(c) if matches!(c.func.as_ref(), Expr::Attribute(a) if a.attr.as_str() == "append"))
}

fn violation(file_path: &str, line: usize, kind: &str) -> Violation {
    let suggestion = match kind {
        "guard-then-work" => "rewrite as `[... for x in xs if condition]`",
        "any-all" => "rewrite as `any(...)`/`all(...)`",
        _ => "rewrite as a list/generator comprehension",
    };
    Violation::new(
        RULE_ID,
        file_path,
        line.max(1),
        0,
        format!("loop embeds a '{kind}' pipeline that a comprehension or built-in would express more directly"),
        Severity::Info,
    )
    .with_suggestion(suggestion)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn flags_guard_then_work_loop() {
        let src = "def f(xs):\n    out = []\n    for x in xs:\n        if not x.valid:\n            continue\n        out.append(x.value)\n    return out\n";
        let ctx = LintContext::new("a.py", Language::Python, src.to_string(), HashMap::new());
        let mut rule = CollectionPipelineRule;
        let violations = rule.check(&ctx);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("guard-then-work"));
    }

    #[test]
    fn flags_any_all_terminal_loop() {
        let src = "def f(xs):\n    for x in xs:\n        if x.valid:\n            return True\n    return False\n";
        let ctx = LintContext::new("a.py", Language::Python, src.to_string(), HashMap::new());
        let mut rule = CollectionPipelineRule;
        let violations = rule.check(&ctx);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("any-all"));
    }

    #[test]
    fn plain_loop_is_not_flagged() {
        let src = "def f(xs):\n    for x in xs:\n        process(x)\n";
        let ctx = LintContext::new("a.py", Language::Python, src.to_string(), HashMap::new());
        let mut rule = CollectionPipelineRule;
        assert!(rule.check(&ctx).is_empty());
    }
}
