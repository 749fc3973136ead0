//! Handler for the root `lint` subcommand and every direct per-rule subcommand (spec.md §6).
//! Grounded in `examples/sthagen-rvben-rumdl/src/commands/check.rs`'s "load config, run, print,
//! compute exit code" shape.

use super::exit_codes;
use crate::formatter::{self, OutputFormat};
use crate::violation::Violation;
use crate::Linter;
use std::path::Path;
use std::process::ExitCode;

/// Runs the full `Linter` (every enabled rule, optionally filtered to `rule_prefixes`) over
/// `path`, prints the result in `format`, and returns the process exit code.
pub fn run_lint(path: &str, rule_prefixes: Option<Vec<String>>, config_file: Option<String>, format: OutputFormat) -> ExitCode {
    ExitCode::from(run_lint_code(path, rule_prefixes, config_file, format) as u8)
}

/// Runs a single direct rule entry point (spec.md §6: `nesting_lint(path, max_depth?)` etc.)
/// and reports its violations the same way `run_lint` does.
pub fn run_direct_rule(violations: Vec<Violation>, format: OutputFormat) -> ExitCode {
    ExitCode::from(emit(&violations, format) as u8)
}

fn run_lint_code(path: &str, rule_prefixes: Option<Vec<String>>, config_file: Option<String>, format: OutputFormat) -> i32 {
    let target = Path::new(path);
    if !target.exists() {
        eprintln!("error: path does not exist: {path}");
        return exit_codes::TOOL_ERROR;
    }

    let mut linter = match &rule_prefixes {
        Some(prefixes) => Linter::with_rules(prefixes.clone()),
        None => Linter::new(),
    };
    if let Some(config_file) = config_file {
        linter = linter.with_config_file(config_file);
    }
    let violations = linter.lint(target);
    emit(&violations, format)
}

fn emit(violations: &[Violation], format: OutputFormat) -> i32 {
    println!("{}", formatter::render(violations, format));
    if violations.is_empty() {
        exit_codes::SUCCESS
    } else {
        exit_codes::VIOLATIONS_FOUND
    }
}
