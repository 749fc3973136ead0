//! The CLI's argument surface (spec.md §1: "deliberately out of scope ... specified only at
//! their interfaces"; spec.md §6: "subcommands per rule and a root `lint` command; flags
//! include `--config`, `--format {text,json,sarif}`, `--max-depth`, `--rules`"). Kept thin,
//! in `clap`'s derive style, mirroring `examples/sthagen-rvben-rumdl/src/main.rs`'s `Cli`/
//! `Commands` shape but fleshed out only for the subcommands spec.md names.

use crate::formatter::OutputFormat;
use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "thailint", author, version, about = "A multi-language static analysis linter", arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to a `.thailint.yaml`/`.thailint.json` config file (overrides ancestor search).
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Output format.
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Lint a file or directory with every enabled rule (the root command, spec.md §6).
    Lint {
        /// File or directory to lint.
        path: String,

        /// Restrict to rule-id prefixes (comma-separated, e.g. `dry,nesting`).
        #[arg(long, value_delimiter = ',')]
        rules: Option<Vec<String>>,
    },

    /// Run only the nesting-depth rule.
    Nesting {
        path: String,
        #[arg(long)]
        max_depth: Option<usize>,
    },

    /// Run only the SRP rule.
    Srp {
        path: String,
        #[arg(long)]
        max_methods: Option<usize>,
    },

    /// Run only the DRY duplicate-code rule.
    Dry {
        path: String,
        #[arg(long)]
        min_duplicate_lines: Option<usize>,
    },

    /// Run only the magic-numbers rule.
    MagicNumbers { path: String },

    /// Run only the stringly-typed rule.
    StringlyTyped {
        path: String,
        #[arg(long)]
        min_occurrences: Option<usize>,
    },

    /// Run only the file-placement rule.
    FilePlacement { path: String },

    /// List every registered rule (id + description).
    Rule,

    /// Generate shell completion scripts (grounded in rumdl's `Completions` subcommand).
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_well_formed() {
        Cli::command().debug_assert();
    }
}
