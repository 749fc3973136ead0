//! Thin CLI wrapper (spec.md §1/§6). All analysis lives in `thailint_lib`; this binary parses
//! arguments, calls the library, renders the result, and maps it to a process exit code.
//! Grounded in `examples/sthagen-rvben-rumdl/src/main.rs`'s `Cli::parse()` → `match
//! cli.command` → `exit::*` shape.

mod cli;
mod commands;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use std::process::ExitCode;
use thailint_lib::{dry_lint, file_placement_lint, magic_numbers_lint, nesting_lint, srp_lint, stringly_typed_lint};

fn main() -> ExitCode {
    env_logger::Builder::from_default_env()
        .format_timestamp(None)
        .format_target(false)
        .init();

    let cli = Cli::parse();
    let format = cli.format;

    match cli.command {
        Commands::Lint { path, rules } => commands::lint::run_lint(&path, rules, cli.config, format),
        Commands::Nesting { path, max_depth } => {
            let violations = nesting_lint(std::path::Path::new(&path), max_depth);
            commands::lint::run_direct_rule(violations, format)
        }
        Commands::Srp { path, max_methods } => {
            let violations = srp_lint(std::path::Path::new(&path), max_methods);
            commands::lint::run_direct_rule(violations, format)
        }
        Commands::Dry { path, min_duplicate_lines } => {
            let violations = dry_lint(std::path::Path::new(&path), min_duplicate_lines);
            commands::lint::run_direct_rule(violations, format)
        }
        Commands::MagicNumbers { path } => {
            let violations = magic_numbers_lint(std::path::Path::new(&path));
            commands::lint::run_direct_rule(violations, format)
        }
        Commands::StringlyTyped { path, min_occurrences } => {
            let violations = stringly_typed_lint(std::path::Path::new(&path), min_occurrences);
            commands::lint::run_direct_rule(violations, format)
        }
        Commands::FilePlacement { path } => {
            let violations = file_placement_lint(std::path::Path::new(&path));
            commands::lint::run_direct_rule(violations, format)
        }
        Commands::Rule => commands::rule::run_rule_list(),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
            ExitCode::SUCCESS
        }
    }
}
