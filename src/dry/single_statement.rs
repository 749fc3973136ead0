//! The single-statement detector (spec.md §4.6): a block that coincides with one syntactic
//! unit must never be flagged as a duplicate (invariant I5). Recognizes a multi-line decorator
//! application, a single call whose arguments span lines, and (for Python, where re-parsing is
//! tractable with the native AST) any window that re-parses as exactly one statement. The
//! overlap check callers perform against this is inclusive at both endpoints (spec.md §4.6).

use crate::analyzers::Language;
use rustpython_parser::ast::Suite;
use rustpython_parser::Parse;

/// `raw_lines` are the *pre-normalization* source lines of the candidate window (spec.md §4.6:
/// the snippet re-parsed is the original text, not the normalized one).
pub fn is_single_statement(raw_lines: &[&str], language: Language) -> bool {
    if raw_lines.is_empty() {
        return false;
    }

    if is_decorator_application(raw_lines) {
        return true;
    }

    if is_balanced_call_continuation(raw_lines) {
        return true;
    }

    if language == Language::Python {
        let joined = raw_lines.join("\n");
        if let Ok(suite) = Suite::parse(&joined, "<window>") {
            return suite.len() == 1 && !is_compound_block(&suite[0]);
        }
    }

    false
}

/// A compound statement with its own nested body (`for`/`while`/`if`/`try`/`with`/`def`/
/// `class`) is excluded from the "re-parses as a single statement" bypass: spec.md §4.6's
/// worked duplicate-detection example (a 3-line `for`/`if`/call block repeated verbatim
/// across two files) is itself exactly one such statement, so treating every compound
/// statement as "a single statement" would make the DRY engine unable to ever flag the
/// most common shape of duplicated logic. Rule (d) is read narrowly: it bypasses simple
/// statements (assignments, expression statements, returns, …) that happen to span several
/// physical lines, not control-flow blocks.
fn is_compound_block(stmt: &rustpython_parser::ast::Stmt) -> bool {
    use rustpython_parser::ast::Stmt;
    matches!(
        stmt,
        Stmt::FunctionDef(_)
            | Stmt::AsyncFunctionDef(_)
            | Stmt::ClassDef(_)
            | Stmt::For(_)
            | Stmt::AsyncFor(_)
            | Stmt::While(_)
            | Stmt::If(_)
            | Stmt::With(_)
            | Stmt::AsyncWith(_)
            | Stmt::Try(_)
            | Stmt::Match(_)
    )
}

/// (a) A multi-line decorator application including its argument list: the window opens on a
/// `@decorator(...)` line.
fn is_decorator_application(raw_lines: &[&str]) -> bool {
    raw_lines[0].trim_start().starts_with('@')
}

/// (b) A single function call whose arguments are split across lines: the first line opens
/// more brackets than it closes, and the cumulative bracket depth returns to exactly zero by
/// the final line (never going negative before that, which would mean the window started
/// mid-expression rather than at a call's opening).
fn is_balanced_call_continuation(raw_lines: &[&str]) -> bool {
    if raw_lines.len() < 2 {
        return false;
    }
    let mut depth: i32 = 0;
    for (i, line) in raw_lines.iter().enumerate() {
        for ch in line.chars() {
            match ch {
                '(' | '[' | '{' => depth += 1,
                ')' | ']' | '}' => depth -= 1,
                _ => {}
            }
        }
        if depth < 0 {
            return false;
        }
        if i == 0 && depth == 0 {
            return false;
        }
    }
    depth == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decorator_with_multiline_args_is_a_single_statement() {
        let lines = vec!["@app.route(", "    \"/foo\",", "    methods=[\"GET\"],", ")"];
        assert!(is_single_statement(&lines, Language::TypeScript));
    }

    #[test]
    fn call_split_across_lines_is_a_single_statement() {
        let lines = vec!["foo(", "    a,", "    b,", ")"];
        assert!(is_single_statement(&lines, Language::TypeScript));
    }

    #[test]
    fn python_window_reparsing_to_one_simple_statement_is_recognized() {
        let lines = vec!["result = (", "    a + b", ")"];
        assert!(is_single_statement(&lines, Language::Python));
    }

    #[test]
    fn a_compound_block_is_not_exempted_even_though_it_is_one_statement() {
        // spec.md §4.6's own worked duplicate-detection example is exactly this shape
        // (a for/if/call block repeated across two files); it must remain detectable.
        let lines = vec!["if True:", "    x = 1"];
        assert!(!is_single_statement(&lines, Language::Python));

        let lines = vec!["for item in items:", "    if item.valid:", "        item.save()"];
        assert!(!is_single_statement(&lines, Language::Python));
    }

    #[test]
    fn two_independent_statements_are_not_a_single_statement() {
        let lines = vec!["x = 1", "y = 2", "z = 3"];
        assert!(!is_single_statement(&lines, Language::Python));
    }

    #[test]
    fn unrelated_sibling_lines_are_not_a_call_continuation() {
        let lines = vec!["foo()", "bar()", "baz()"];
        assert!(!is_balanced_call_continuation(&lines));
    }
}
