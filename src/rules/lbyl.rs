//! `lbyl.*` (spec.md §4.8): flags Look-Before-You-Leap precondition checks that Python's
//! EAFP idiom would express as a `try`/`except` instead. Each pattern is independently
//! toggleable; `dict_key`, `hasattr`, `file_exists`, `len_check`, `string_validation`, and
//! `division_check` default on, `isinstance`/`none_check` default off.

use crate::analyzers::{Language, Tree};
use crate::lint_context::LintContext;
use crate::rule::Rule;
use crate::violation::{Severity, Violation};
use rustpython_ast::{CmpOp, Expr, Stmt};

const RULE_ID_PREFIX: &str = "lbyl";

#[derive(Debug, Clone, Copy)]
struct Toggles {
    dict_key: bool,
    hasattr: bool,
    isinstance: bool,
    file_exists: bool,
    len_check: bool,
    none_check: bool,
    string_validation: bool,
    division_check: bool,
}

impl Default for Toggles {
    fn default() -> Self {
        Self {
            dict_key: true,
            hasattr: true,
            isinstance: false,
            file_exists: true,
            len_check: true,
            none_check: false,
            string_validation: true,
            division_check: true,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LbylRule;

impl Rule for LbylRule {
    fn rule_id(&self) -> &'static str {
        "lbyl.precondition-check"
    }

    fn description(&self) -> &'static str {
        "explicit precondition checks that EAFP-style exception handling would express more directly"
    }

    fn languages(&self) -> &'static [Language] {
        &[Language::Python]
    }

    fn check(&mut self, ctx: &LintContext) -> Vec<Violation> {
        let toggles = resolve_toggles(ctx);
        let Ok(Tree::Python(py)) = ctx.ast() else { return Vec::new() };

        let mut out = Vec::new();
        for f in py.functions() {
            walk_body(f.body, &ctx.file_content, &ctx.file_path, &toggles, &mut out);
        }
        out
    }
}

fn resolve_toggles(ctx: &LintContext) -> Toggles {
    let section = ctx.rule_config("lbyl");
    let mut t = Toggles::default();
    let get = |key: &str| section.and_then(|v| v.get(key)).and_then(|v| v.as_bool());
    if let Some(v) = get("dict_key") {
        t.dict_key = v;
    }
    if let Some(v) = get("hasattr") {
        t.hasattr = v;
    }
    if let Some(v) = get("isinstance") {
        t.isinstance = v;
    }
    if let Some(v) = get("file_exists") {
        t.file_exists = v;
    }
    if let Some(v) = get("len_check") {
        t.len_check = v;
    }
    if let Some(v) = get("none_check") {
        t.none_check = v;
    }
    if let Some(v) = get("string_validation") {
        t.string_validation = v;
    }
    if let Some(v) = get("division_check") {
        t.division_check = v;
    }
    t
}

fn walk_body(body: &[Stmt], source: &str, file_path: &str, toggles: &Toggles, out: &mut Vec<Violation>) {
    for stmt in body {
        if let Stmt::If(s) = stmt {
            if let Some(kind) = classify_condition(&s.test, &s.body, toggles) {
                out.push(violation(file_path, line_of(stmt, source), kind));
            }
            walk_body(&s.body, source, file_path, toggles, out);
            walk_body(&s.orelse, source, file_path, toggles, out);
        } else {
            for nested in crate::analyzers::python::nested_bodies(stmt) {
                walk_body(nested, source, file_path, toggles, out);
            }
        }
    }
}

fn line_of(stmt: &Stmt, source: &str) -> usize {
    use rustpython_ast::Ranged;
    crate::analyzers::python::line_for_offset(source, stmt.range().start().to_usize())
}

fn classify_condition(test: &Expr, if_body: &[Stmt], toggles: &Toggles) -> Option<&'static str> {
    match test {
        Expr::Compare(c) if matches!(c.ops.first(), Some(CmpOp::In)) => {
            if !toggles.dict_key {
                return None;
            }
            let subject = c.comparators.first()?;
            // Require a dict-*like* subject (a variable or attribute, not a literal
            // list/tuple/set) since there is no type inference to confirm it is a dict;
            // a literal-collection membership test is a stringly-typed concern, not a
            // dict-key lookup.
            if !matches!(subject, Expr::Name(_) | Expr::Attribute(_)) {
                return None;
            }
            if is_subscript_follow_up_pattern(&c.left, subject, if_body) {
                Some("dict_key")
            } else {
                None
            }
        }
        Expr::Call(call) => {
            let name = call_name(&call.func)?;
            match name.as_str() {
                "hasattr" if toggles.hasattr => Some("hasattr"),
                "isinstance" if toggles.isinstance => Some("isinstance"),
                _ => {
                    if toggles.file_exists && (name.ends_with("exists") || name.ends_with("isfile")) {
                        Some("file_exists")
                    } else {
                        None
                    }
                }
            }
        }
        Expr::Compare(c) if is_len_call(&c.left) && toggles.len_check => Some("len_check"),
        Expr::Compare(c) if is_none_compare(c) && toggles.none_check => Some("none_check"),
        Expr::Compare(c) if is_string_validation(&c.left) && toggles.string_validation => Some("string_validation"),
        Expr::Compare(c) if is_zero_compare(c) && toggles.division_check => Some("division_check"),
        _ => None,
    }
}

/// `dict_key` semantics: the `if` body must subscript the *same* dict subject with the *same*
/// key the `in` test checked (`if key in d: ... d[key] ...`), structurally, not just contain
/// any subscript at all.
fn is_subscript_follow_up_pattern(key: &Expr, subject: &Expr, if_body: &[Stmt]) -> bool {
    body_contains_subscript(if_body, key, subject)
}

fn body_contains_subscript(body: &[Stmt], key: &Expr, subject: &Expr) -> bool {
    for stmt in body {
        if stmt_exprs(stmt).iter().any(|e| contains_matching_subscript(e, key, subject)) {
            return true;
        }
        for nested in crate::analyzers::python::nested_bodies(stmt) {
            if body_contains_subscript(nested, key, subject) {
                return true;
            }
        }
    }
    false
}

/// The expressions a statement directly evaluates, used to search for the follow-up subscript
/// without needing a full statement-level visitor.
fn stmt_exprs(stmt: &Stmt) -> Vec<&Expr> {
    match stmt {
        Stmt::Return(r) => r.value.iter().collect(),
        Stmt::Assign(a) => vec![&a.value],
        Stmt::AugAssign(a) => vec![&a.value],
        Stmt::AnnAssign(a) => a.value.iter().map(AsRef::as_ref).collect(),
        Stmt::Expr(e) => vec![&e.value],
        _ => vec![],
    }
}

fn contains_matching_subscript(expr: &Expr, key: &Expr, subject: &Expr) -> bool {
    if let Expr::Subscript(s) = expr {
        if expr_equal(&s.value, subject) && expr_equal(&s.slice, key) {
            return true;
        }
    }
    expr_children(expr).iter().any(|child| contains_matching_subscript(child, key, subject))
}

/// Direct child expressions to recurse into while hunting for a matching subscript.
fn expr_children(expr: &Expr) -> Vec<&Expr> {
    match expr {
        Expr::BoolOp(b) => b.values.iter().collect(),
        Expr::BinOp(b) => vec![&b.left, &b.right],
        Expr::UnaryOp(u) => vec![&u.operand],
        Expr::Compare(c) => std::iter::once(c.left.as_ref()).chain(c.comparators.iter()).collect(),
        Expr::Call(c) => std::iter::once(c.func.as_ref()).chain(c.args.iter()).collect(),
        Expr::Attribute(a) => vec![&a.value],
        Expr::Subscript(s) => vec![&s.value, &s.slice],
        Expr::Tuple(t) => t.elts.iter().collect(),
        Expr::List(l) => l.elts.iter().collect(),
        Expr::Set(s) => s.elts.iter().collect(),
        Expr::IfExp(i) => vec![&i.test, &i.body, &i.orelse],
        Expr::NamedExpr(n) => vec![&n.value],
        _ => vec![],
    }
}

/// Structural equality (not identity) over the narrow set of expression shapes a dict
/// key/subject is likely to be: names, attribute chains, and literal constants.
fn expr_equal(a: &Expr, b: &Expr) -> bool {
    match (a, b) {
        (Expr::Name(x), Expr::Name(y)) => x.id == y.id,
        (Expr::Attribute(x), Expr::Attribute(y)) => x.attr == y.attr && expr_equal(&x.value, &y.value),
        (Expr::Constant(x), Expr::Constant(y)) => constant_equal(&x.value, &y.value),
        _ => false,
    }
}

fn constant_equal(a: &rustpython_ast::Constant, b: &rustpython_ast::Constant) -> bool {
    use rustpython_ast::Constant;
    match (a, b) {
        (Constant::Str(x), Constant::Str(y)) => x == y,
        (Constant::Int(x), Constant::Int(y)) => x == y,
        (Constant::Bool(x), Constant::Bool(y)) => x == y,
        (Constant::None, Constant::None) => true,
        _ => false,
    }
}

fn call_name(func: &Expr) -> Option<String> {
    match func {
        Expr::Name(n) => Some(n.id.to_string()),
        Expr::Attribute(a) => Some(a.attr.to_string()),
        _ => None,
    }
}

fn is_len_call(expr: &Expr) -> bool {
    matches!(expr, Expr::Call(c) if matches!(c.func.as_ref(), Expr::Name(n) if n.id.as_str() == "len"))
}

fn is_none_compare(c: &rustpython_ast::ExprCompare) -> bool {
    matches!(c.ops.first(), Some(CmpOp::Is) | Some(CmpOp::IsNot))
        && c.comparators.first().is_some_and(|e| matches!(e, Expr::Constant(k) if matches!(k.value, rustpython_ast::Constant::None)))
}

fn is_string_validation(expr: &Expr) -> bool {
    matches!(expr, Expr::Call(c) if matches!(&c.func.as_ref(), Expr::Attribute(a) if matches!(a.attr.as_str(), "isdigit" | "isalpha" | "isalnum" | "strip")))
}

fn is_zero_compare(c: &rustpython_ast::ExprCompare) -> bool {
    matches!(c.ops.first(), Some(CmpOp::NotEq) | Some(CmpOp::Eq))
        && c.comparators
            .first()
            .is_some_and(|e| matches!(e, Expr::Constant(k) if matches!(&k.value, rustpython_ast::Constant::Int(i) if i.to_string() == "0")))
}

fn violation(file_path: &str, line: usize, kind: &str) -> Violation {
    Violation::new(
        format!("{RULE_ID_PREFIX}.{kind}"),
        file_path,
        line.max(1),
        0,
        format!("look-before-you-leap '{kind}' check; consider try/except instead"),
        Severity::Info,
    )
    .with_suggestion("attempt the operation and catch the specific exception instead of pre-checking")
}
