//! Plain-text formatter: one line per violation, `colored` severity tag, grounded in
//! `examples/sthagen-rvben-rumdl/src/formatter.rs`'s `path:line:col: [rule] message` shape.

use crate::violation::{Severity, Violation};
use colored::Colorize;

pub fn render(violations: &[Violation]) -> String {
    if violations.is_empty() {
        return "No violations found.\n".to_string();
    }

    let mut out = String::new();
    for v in violations {
        let tag = match v.severity {
            Severity::Error => "error".red().bold(),
            Severity::Warning => "warning".yellow().bold(),
            Severity::Info => "info".blue().bold(),
        };
        out.push_str(&format!(
            "{}:{}:{}: {} [{}] {}\n",
            v.file_path, v.line, v.column, tag, v.rule_id, v.message
        ));
        if let Some(suggestion) = &v.suggestion {
            out.push_str(&format!("  {} {}\n", "suggestion:".dimmed(), suggestion));
        }
    }
    out.push_str(&format!("\n{} violation(s) found.\n", violations.len()));
    out
}
