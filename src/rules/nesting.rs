//! `nesting.excessive-depth` (spec.md §4.8): flags functions/methods whose maximum nesting
//! depth (counting `if`/`for`/`while`/`try`/`with`/function-def and language equivalents)
//! exceeds `max_depth`.

use crate::analyzers::{Language, Tree};
use crate::lint_context::LintContext;
use crate::rule::Rule;
use crate::violation::{Severity, Violation};

const RULE_ID: &str = "nesting.excessive-depth";
const DEFAULT_MAX_DEPTH: usize = 4;

#[derive(Debug, Clone, Default)]
pub struct NestingRule;

impl Rule for NestingRule {
    fn rule_id(&self) -> &'static str {
        RULE_ID
    }

    fn description(&self) -> &'static str {
        "function/method nesting depth should not exceed the configured maximum"
    }

    fn languages(&self) -> &'static [Language] {
        &[Language::Python, Language::TypeScript, Language::JavaScript]
    }

    fn check(&mut self, ctx: &LintContext) -> Vec<Violation> {
        let max_depth = resolve_max_depth(ctx);
        let Ok(tree) = ctx.ast() else { return Vec::new() };

        match tree {
            Tree::Python(py) => py
                .functions()
                .into_iter()
                .filter_map(|f| {
                    let depth = crate::analyzers::python::PythonTree::max_nesting_depth(f.body);
                    (depth > max_depth).then(|| violation(&ctx.file_path, f.line, &f.name, depth, max_depth))
                })
                .collect(),
            Tree::TypeScript(ts) => ts_function_violations(ts, &ctx.file_path, max_depth),
            _ => Vec::new(),
        }
    }
}

fn resolve_max_depth(ctx: &LintContext) -> usize {
    ctx.rule_config("nesting")
        .and_then(|v| v.get("max_depth"))
        .and_then(|v| v.as_u64())
        .map(|v| v as usize)
        .unwrap_or(DEFAULT_MAX_DEPTH)
}

fn violation(file_path: &str, line: usize, name: &str, depth: usize, max_depth: usize) -> Violation {
    Violation::new(
        RULE_ID,
        file_path,
        line,
        0,
        format!("function '{name}' has nesting depth {depth}, exceeding the maximum of {max_depth}"),
        Severity::Warning,
    )
    .with_suggestion("extract nested branches into separate functions or use early returns")
}

/// Walks tree-sitter function bodies, counting `if_statement`/`for_statement`/`while_statement`/
/// `try_statement`/nested function expressions as one level each (the TS/JS equivalent of
/// spec.md §4.8's depth-increasing statement set).
fn ts_function_violations(
    ts: &crate::analyzers::typescript::TsTree,
    file_path: &str,
    max_depth: usize,
) -> Vec<Violation> {
    use tree_sitter::Node;

    fn is_function_kind(kind: &str) -> bool {
        matches!(
            kind,
            "function_declaration" | "function_expression" | "arrow_function" | "method_definition"
        )
    }

    fn is_depth_increasing(kind: &str) -> bool {
        matches!(
            kind,
            "if_statement" | "for_statement" | "for_in_statement" | "while_statement" | "try_statement"
        )
    }

    fn max_depth_in<'a>(node: Node<'a>, current: usize) -> usize {
        let mut deepest = current;
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if is_function_kind(child.kind()) {
                continue; // nested functions are measured independently by the outer walk.
            }
            let next = if is_depth_increasing(child.kind()) { current + 1 } else { current };
            deepest = deepest.max(max_depth_in(child, next));
        }
        deepest
    }

    fn function_name(node: Node, source: &str) -> String {
        node.child_by_field_name("name")
            .map(|n| source[n.byte_range()].to_string())
            .unwrap_or_else(|| "<anonymous>".to_string())
    }

    fn walk<'a>(node: Node<'a>, source: &str, file_path: &str, max_depth: usize, out: &mut Vec<Violation>) {
        if is_function_kind(node.kind()) {
            let body = node.child_by_field_name("body").unwrap_or(node);
            let depth = max_depth_in(body, 0);
            if depth > max_depth {
                out.push(violation(
                    file_path,
                    node.start_position().row + 1,
                    &function_name(node, source),
                    depth,
                    max_depth,
                ));
            }
        }
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            walk(child, source, file_path, max_depth, out);
        }
    }

    let mut out = Vec::new();
    walk(ts.tree.root_node(), &ts.source, file_path, max_depth, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn flags_python_function_exceeding_default_depth() {
        let src = "def f():\n    if a:\n        for b in c:\n            while d:\n                try:\n                    pass\n                except Exception:\n                    pass\n";
        let ctx = LintContext::new("a.py", Language::Python, src.to_string(), HashMap::new());
        let mut rule = NestingRule;
        let violations = rule.check(&ctx);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains('f'));
    }

    #[test]
    fn shallow_function_is_not_flagged() {
        let src = "def f():\n    if a:\n        pass\n";
        let ctx = LintContext::new("a.py", Language::Python, src.to_string(), HashMap::new());
        let mut rule = NestingRule;
        assert!(rule.check(&ctx).is_empty());
    }

    #[test]
    fn typescript_deep_nesting_is_flagged() {
        let src = "function f() {\n  if (a) {\n    for (;;) {\n      while (b) {\n        try {\n          g();\n        } catch (e) {}\n      }\n    }\n  }\n}\n";
        let ctx = LintContext::new("a.ts", Language::TypeScript, src.to_string(), HashMap::new());
        let mut rule = NestingRule;
        assert_eq!(rule.check(&ctx).len(), 1);
    }
}
