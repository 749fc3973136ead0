//! Native Python AST analyzer — the "host language" analyzer of spec.md §4.7.
//!
//! Grounded in `examples/proboscis-pinjected/packages/pinjected-linter/rust-poc`, which parses
//! Python with `rustpython-parser`/`rustpython-ast` for its own linter; we reuse the same crates
//! for the same purpose (read-only AST, no execution — spec.md §1 Non-goals).

use super::{Language, ParseError};
use rustpython_ast::{Expr, Stmt};
use rustpython_parser::ast::Suite;
use rustpython_parser::Parse;

pub struct PythonTree {
    pub module: Suite,
    source: String,
}

pub fn parse(source: &str) -> Result<PythonTree, ParseError> {
    let module = Suite::parse(source, "<module>").map_err(|e| ParseError {
        language: Language::Python,
        message: e.to_string(),
    })?;
    Ok(PythonTree {
        module,
        source: source.to_string(),
    })
}

/// Converts a byte offset (as carried on every rustpython AST node's `range()`) into a
/// 1-indexed line number, since rustpython's `TextSize` is byte-based, not line-based.
pub fn line_for_offset(source: &str, offset: usize) -> usize {
    source.as_bytes()[..offset.min(source.len())].iter().filter(|&&b| b == b'\n').count() + 1
}

/// A class definition discovered anywhere in the module (top-level or nested).
pub struct ClassInfo<'a> {
    pub name: String,
    pub line: usize,
    pub end_line: usize,
    pub column: usize,
    pub bases: Vec<String>,
    pub decorators: &'a [Expr],
    pub body: &'a [Stmt],
}

/// A function/method definition discovered anywhere in the module.
pub struct FunctionInfo<'a> {
    pub name: String,
    pub line: usize,
    pub column: usize,
    pub is_method: bool,
    pub decorators: &'a [Expr],
    pub args: &'a rustpython_ast::Arguments,
    pub body: &'a [Stmt],
}

impl PythonTree {
    /// Enumerate every class definition, at any nesting level (spec.md §4.7).
    pub fn classes(&self) -> Vec<ClassInfo<'_>> {
        let mut out = Vec::new();
        collect_classes(&self.module, &self.source, &mut out);
        out
    }

    /// Enumerate every function/method definition, at any nesting level (spec.md §4.7).
    pub fn functions(&self) -> Vec<FunctionInfo<'_>> {
        let mut out = Vec::new();
        collect_functions(&self.module, false, &self.source, &mut out);
        out
    }

    /// Compute the maximum nesting depth inside a function body, counting `if`, `for`, `while`,
    /// `try`, `with`, and nested function/class defs (the `nesting.excessive-depth` contract,
    /// spec.md §4.8).
    pub fn max_nesting_depth(body: &[Stmt]) -> usize {
        max_depth(body, 0)
    }
}

fn collect_classes<'a>(body: &'a [Stmt], source: &str, out: &mut Vec<ClassInfo<'a>>) {
    for stmt in body {
        if let Stmt::ClassDef(c) = stmt {
            out.push(ClassInfo {
                name: c.name.to_string(),
                line: line_for_offset(source, c.range.start().to_usize()),
                end_line: line_for_offset(source, c.range.end().to_usize()),
                column: 0,
                bases: c.bases.iter().filter_map(expr_name).collect(),
                decorators: &c.decorator_list,
                body: &c.body,
            });
            collect_classes(&c.body, source, out);
        } else {
            for nested in nested_bodies(stmt) {
                collect_classes(nested, source, out);
            }
        }
    }
}

fn collect_functions<'a>(body: &'a [Stmt], in_class_body: bool, source: &str, out: &mut Vec<FunctionInfo<'a>>) {
    for stmt in body {
        match stmt {
            Stmt::FunctionDef(f) => {
                out.push(FunctionInfo {
                    name: f.name.to_string(),
                    line: line_for_offset(source, f.range.start().to_usize()),
                    column: 0,
                    is_method: in_class_body,
                    decorators: &f.decorator_list,
                    args: &f.args,
                    body: &f.body,
                });
                collect_functions(&f.body, false, source, out);
            }
            Stmt::AsyncFunctionDef(f) => {
                out.push(FunctionInfo {
                    name: f.name.to_string(),
                    line: line_for_offset(source, f.range.start().to_usize()),
                    column: 0,
                    is_method: in_class_body,
                    decorators: &f.decorator_list,
                    args: &f.args,
                    body: &f.body,
                });
                collect_functions(&f.body, false, source, out);
            }
            Stmt::ClassDef(c) => collect_functions(&c.body, true, source, out),
            _ => {
                for nested in nested_bodies(stmt) {
                    collect_functions(nested, in_class_body, source, out);
                }
            }
        }
    }
}

/// Every direct child statement-list of a statement that can hold nested blocks
/// (excludes `ClassDef`/`FunctionDef`, handled explicitly by callers).
pub(crate) fn nested_bodies(stmt: &Stmt) -> Vec<&[Stmt]> {
    match stmt {
        Stmt::If(s) => vec![&s.body, &s.orelse],
        Stmt::For(s) => vec![&s.body, &s.orelse],
        Stmt::AsyncFor(s) => vec![&s.body, &s.orelse],
        Stmt::While(s) => vec![&s.body, &s.orelse],
        Stmt::With(s) => vec![&s.body],
        Stmt::AsyncWith(s) => vec![&s.body],
        Stmt::Try(s) => {
            let mut v = vec![&s.body[..], &s.orelse[..], &s.finalbody[..]];
            for h in &s.handlers {
                let rustpython_ast::ExceptHandler::ExceptHandler(h) = h;
                v.push(&h.body);
            }
            v
        }
        _ => vec![],
    }
}

fn expr_name(e: &Expr) -> Option<String> {
    match e {
        Expr::Name(n) => Some(n.id.to_string()),
        Expr::Attribute(a) => Some(a.attr.to_string()),
        _ => None,
    }
}

/// Statements that count as one level of nesting depth per spec.md §4.8.
fn is_depth_increasing(stmt: &Stmt) -> bool {
    matches!(
        stmt,
        Stmt::If(_)
            | Stmt::For(_)
            | Stmt::AsyncFor(_)
            | Stmt::While(_)
            | Stmt::Try(_)
            | Stmt::With(_)
            | Stmt::AsyncWith(_)
            | Stmt::FunctionDef(_)
            | Stmt::AsyncFunctionDef(_)
    )
}

fn max_depth(body: &[Stmt], current: usize) -> usize {
    let mut deepest = current;
    for stmt in body {
        let next = if is_depth_increasing(stmt) { current + 1 } else { current };
        deepest = deepest.max(next);
        for nested in nested_bodies(stmt) {
            deepest = deepest.max(max_depth(nested, next));
        }
        if let Stmt::If(s) = stmt {
            deepest = deepest.max(max_depth(&s.orelse, current));
        }
    }
    deepest
}
