//! `stateless-class.violation` (spec.md §4.8): flags Python classes with ≥ `min_methods`
//! methods and no constructor, no instance/class attributes, no non-`object` bases, and no
//! decorators — exempting ABC/Protocol bases, `Mixin`-named classes, and test classes.

use crate::analyzers::{Language, Tree};
use crate::lint_context::LintContext;
use crate::rule::Rule;
use crate::violation::{Severity, Violation};
use rustpython_ast::{Expr, Stmt};

const RULE_ID: &str = "stateless-class.violation";
const DEFAULT_MIN_METHODS: usize = 2;
const EXEMPT_BASES: &[&str] = &["ABC", "Protocol", "ABCMeta"];

#[derive(Debug, Clone, Default)]
pub struct StatelessClassRule;

impl Rule for StatelessClassRule {
    fn rule_id(&self) -> &'static str {
        RULE_ID
    }

    fn description(&self) -> &'static str {
        "classes with only methods and no instance state should be free functions"
    }

    fn languages(&self) -> &'static [Language] {
        &[Language::Python]
    }

    fn check(&mut self, ctx: &LintContext) -> Vec<Violation> {
        let min_methods = ctx
            .rule_config("stateless-class")
            .and_then(|v| v.get("min_methods"))
            .and_then(|v| v.as_u64())
            .map(|v| v as usize)
            .unwrap_or(DEFAULT_MIN_METHODS);

        let Ok(Tree::Python(py)) = ctx.ast() else { return Vec::new() };
        let is_test_file = is_test_file(&ctx.file_path);

        py.classes()
            .into_iter()
            .filter(|c| is_stateless_violation(c, min_methods, is_test_file))
            .map(|c| {
                Violation::new(
                    RULE_ID,
                    &ctx.file_path,
                    c.line,
                    0,
                    format!("class '{}' has no instance state; consider free functions or a module", c.name),
                    Severity::Info,
                )
                .with_suggestion("replace the class with a module of free functions")
            })
            .collect()
    }
}

fn is_test_file(file_path: &str) -> bool {
    let path = std::path::Path::new(file_path);
    path.components().any(|c| c.as_os_str() == "tests")
        || path.file_name().is_some_and(|f| f.to_string_lossy().starts_with("test_"))
}

fn is_stateless_violation(c: &crate::analyzers::python::ClassInfo, min_methods: usize, in_test_file: bool) -> bool {
    let method_count = c.body.iter().filter(|s| is_method(s)).count();
    if method_count < min_methods {
        return false;
    }
    if !c.decorators.is_empty() {
        return false;
    }
    if is_exempt_by_name_or_bases(&c.name, &c.bases, in_test_file) {
        return false;
    }
    if has_constructor(c.body) {
        return false;
    }
    if has_instance_attribute(c.body) {
        return false;
    }
    if has_class_level_attribute(c.body) {
        return false;
    }
    true
}

fn is_method(stmt: &Stmt) -> bool {
    matches!(stmt, Stmt::FunctionDef(_) | Stmt::AsyncFunctionDef(_))
}

/// Exemptions per spec.md §4.8: ABC/Protocol bases, `Mixin`-named classes (case-insensitive),
/// and test classes (name prefix `Test`, a `TestCase` base, or residing in a test file/dir).
fn is_exempt_by_name_or_bases(name: &str, bases: &[String], in_test_file: bool) -> bool {
    if name.to_ascii_lowercase().contains("mixin") {
        return true;
    }
    if name.starts_with("Test") || in_test_file {
        return true;
    }
    bases
        .iter()
        .any(|b| EXEMPT_BASES.contains(&b.as_str()) || b == "TestCase" || b != "object")
}

fn has_constructor(body: &[Stmt]) -> bool {
    body.iter().any(|s| matches!(s, Stmt::FunctionDef(f) if f.name.as_str() == "__init__"))
}

fn has_instance_attribute(body: &[Stmt]) -> bool {
    body.iter().any(|s| statement_assigns_self_attr(s))
}

fn statement_assigns_self_attr(stmt: &Stmt) -> bool {
    match stmt {
        Stmt::FunctionDef(f) => f.body.iter().any(assigns_self_attr_stmt),
        Stmt::AsyncFunctionDef(f) => f.body.iter().any(assigns_self_attr_stmt),
        _ => false,
    }
}

fn assigns_self_attr_stmt(stmt: &Stmt) -> bool {
    match stmt {
        Stmt::Assign(a) => a.targets.iter().any(is_self_attr_target),
        Stmt::AnnAssign(a) => is_self_attr_target(&a.target),
        Stmt::AugAssign(a) => is_self_attr_target(&a.target),
        Stmt::If(s) => s.body.iter().any(assigns_self_attr_stmt) || s.orelse.iter().any(assigns_self_attr_stmt),
        Stmt::For(s) => s.body.iter().any(assigns_self_attr_stmt),
        Stmt::While(s) => s.body.iter().any(assigns_self_attr_stmt),
        Stmt::With(s) => s.body.iter().any(assigns_self_attr_stmt),
        Stmt::Try(s) => s.body.iter().any(assigns_self_attr_stmt) || s.finalbody.iter().any(assigns_self_attr_stmt),
        _ => false,
    }
}

fn is_self_attr_target(expr: &Expr) -> bool {
    matches!(expr, Expr::Attribute(a) if matches!(a.value.as_ref(), Expr::Name(n) if n.id.as_str() == "self"))
}

fn has_class_level_attribute(body: &[Stmt]) -> bool {
    body.iter().any(|s| matches!(s, Stmt::Assign(_) | Stmt::AnnAssign(_)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn flags_class_with_only_stateless_methods() {
        let src = "class Calculator:\n    def add(self, a, b):\n        return a + b\n\n    def sub(self, a, b):\n        return a - b\n";
        let ctx = LintContext::new("a.py", Language::Python, src.to_string(), HashMap::new());
        let mut rule = StatelessClassRule;
        assert_eq!(rule.check(&ctx).len(), 1);
    }

    #[test]
    fn class_with_constructor_is_not_flagged() {
        let src = "class Calculator:\n    def __init__(self):\n        self.x = 1\n\n    def add(self, a, b):\n        return a + b\n\n    def sub(self, a, b):\n        return a - b\n";
        let ctx = LintContext::new("a.py", Language::Python, src.to_string(), HashMap::new());
        let mut rule = StatelessClassRule;
        assert!(rule.check(&ctx).is_empty());
    }

    #[test]
    fn mixin_named_class_is_exempt() {
        let src = "class LoggingMixin:\n    def log(self, msg):\n        return msg\n\n    def warn(self, msg):\n        return msg\n";
        let ctx = LintContext::new("a.py", Language::Python, src.to_string(), HashMap::new());
        let mut rule = StatelessClassRule;
        assert!(rule.check(&ctx).is_empty());
    }

    #[test]
    fn test_class_is_exempt() {
        let src = "class TestThing:\n    def test_a(self):\n        pass\n\n    def test_b(self):\n        pass\n";
        let ctx = LintContext::new("a.py", Language::Python, src.to_string(), HashMap::new());
        let mut rule = StatelessClassRule;
        assert!(rule.check(&ctx).is_empty());
    }
}
