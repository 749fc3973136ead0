//! C9 (boundary): output formatters. Spec.md §1 puts formatter wording out of scope but §6
//! specifies the SARIF v2.1.0 shape at the interface level, so it is implemented verbatim;
//! `text`/`json` are the CLI's two informal formats.
//!
//! Grounded in `examples/astral-sh-ruff/crates/ruff/src/printer.rs`'s `OutputFormat` dispatch
//! (`OutputFormat::Text | Json | Sarif | ... => Emitter::emit`), generalized to this crate's
//! three formats.

pub mod json;
pub mod sarif;
pub mod text;

use crate::violation::Violation;
use std::fmt;

/// Output format selected by the CLI's `--format` flag (spec.md §6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Sarif,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Sarif => "sarif",
        })
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "sarif" => Ok(OutputFormat::Sarif),
            other => Err(format!("unrecognized output format '{other}' (expected text, json, or sarif)")),
        }
    }
}

/// Renders `violations` in `format`, ready to write to stdout.
pub fn render(violations: &[Violation], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => text::render(violations),
        OutputFormat::Json => json::render(violations),
        OutputFormat::Sarif => sarif::render(violations),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_format_names_case_insensitively() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("sarif".parse::<OutputFormat>().unwrap(), OutputFormat::Sarif);
    }

    #[test]
    fn rejects_unknown_format_name() {
        assert!("xml".parse::<OutputFormat>().is_err());
    }
}
