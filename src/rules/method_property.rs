//! `method-property.should-be-property` (spec.md §4.8): Python-only. Flags a no-argument,
//! non-dunder, undecorated method whose body is just an optional docstring followed by a
//! `return` of a simple `self.*` expression — no loops, `try`, or calls.

use crate::analyzers::{Language, Tree};
use crate::lint_context::LintContext;
use crate::rule::Rule;
use crate::violation::{Severity, Violation};
use rustpython_ast::{Expr, Stmt};

const RULE_ID: &str = "method-property.should-be-property";

#[derive(Debug, Clone, Default)]
pub struct MethodPropertyRule;

impl Rule for MethodPropertyRule {
    fn rule_id(&self) -> &'static str {
        RULE_ID
    }

    fn description(&self) -> &'static str {
        "a simple accessor method should be exposed as a @property"
    }

    fn languages(&self) -> &'static [Language] {
        &[Language::Python]
    }

    fn check(&mut self, ctx: &LintContext) -> Vec<Violation> {
        let Ok(Tree::Python(py)) = ctx.ast() else { return Vec::new() };

        py.functions()
            .into_iter()
            .filter(|f| f.is_method && is_accessor_candidate(&f))
            .map(|f| {
                Violation::new(
                    RULE_ID,
                    &ctx.file_path,
                    f.line,
                    0,
                    format!("method '{}' only returns a simple expression; consider @property", f.name),
                    Severity::Info,
                )
                .with_suggestion("add @property so callers use attribute access instead of a call")
            })
            .collect()
    }
}

fn is_accessor_candidate(f: &crate::analyzers::python::FunctionInfo) -> bool {
    if f.name.starts_with("__") && f.name.ends_with("__") {
        return false;
    }
    if !f.decorators.is_empty() {
        return false;
    }
    if f.args.args.len() != 1 || !f.args.posonlyargs.is_empty() || !f.args.kwonlyargs.is_empty() {
        return false;
    }
    if f.args.vararg.is_some() || f.args.kwarg.is_some() {
        return false;
    }

    let body = skip_docstring(f.body);
    let [Stmt::Return(r)] = body else { return false };
    r.value.as_deref().is_some_and(is_simple_self_expr)
}

fn skip_docstring(body: &[Stmt]) -> &[Stmt] {
    match body {
        [Stmt::Expr(e), rest @ ..] if matches!(e.value.as_ref(), Expr::Constant(c) if matches!(c.value, rustpython_ast::Constant::Str(_))) => {
            rest
        }
        _ => body,
    }
}

/// `self.x`, `self.x.y`, `self._x`, `not self.x`, or a boolean/comparison over `self.*` — no
/// call expressions anywhere in the tree (method-property candidates must have zero side effects).
fn is_simple_self_expr(expr: &Expr) -> bool {
    match expr {
        Expr::Attribute(a) => is_self_or_attr_chain(&a.value),
        Expr::UnaryOp(u) => is_simple_self_expr(&u.operand),
        Expr::Compare(c) => is_simple_self_expr(&c.left) && c.comparators.iter().all(is_simple_self_expr),
        Expr::BoolOp(b) => b.values.iter().all(is_simple_self_expr),
        Expr::Constant(_) => true,
        Expr::Name(n) => n.id.as_str() == "self",
        _ => false,
    }
}

fn is_self_or_attr_chain(expr: &Expr) -> bool {
    match expr {
        Expr::Name(n) => n.id.as_str() == "self",
        Expr::Attribute(a) => is_self_or_attr_chain(&a.value),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn flags_simple_self_attribute_accessor() {
        let src = "class Foo:\n    def name(self):\n        return self._name\n";
        let ctx = LintContext::new("a.py", Language::Python, src.to_string(), HashMap::new());
        let mut rule = MethodPropertyRule;
        let violations = rule.check(&ctx);
        assert_eq!(violations.len(), 1);
    }

    #[test]
    fn flags_accessor_with_leading_docstring() {
        let src = "class Foo:\n    def name(self):\n        \"\"\"The name.\"\"\"\n        return self._name\n";
        let ctx = LintContext::new("a.py", Language::Python, src.to_string(), HashMap::new());
        let mut rule = MethodPropertyRule;
        assert_eq!(rule.check(&ctx).len(), 1);
    }

    #[test]
    fn method_with_arguments_is_not_flagged() {
        let src = "class Foo:\n    def scaled(self, factor):\n        return self._value * factor\n";
        let ctx = LintContext::new("a.py", Language::Python, src.to_string(), HashMap::new());
        let mut rule = MethodPropertyRule;
        assert!(rule.check(&ctx).is_empty());
    }

    #[test]
    fn method_with_call_is_not_flagged() {
        let src = "class Foo:\n    def compute(self):\n        return self._helper()\n";
        let ctx = LintContext::new("a.py", Language::Python, src.to_string(), HashMap::new());
        let mut rule = MethodPropertyRule;
        assert!(rule.check(&ctx).is_empty());
    }

    #[test]
    fn dunder_method_is_not_flagged() {
        let src = "class Foo:\n    def __repr__(self):\n        return self._name\n";
        let ctx = LintContext::new("a.py", Language::Python, src.to_string(), HashMap::new());
        let mut rule = MethodPropertyRule;
        assert!(rule.check(&ctx).is_empty());
    }
}
