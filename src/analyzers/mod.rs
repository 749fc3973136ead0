//! C1: per-language AST parsing abstraction (spec.md §4.7).
//!
//! The host language (Python) gets a native AST via `rustpython-parser`/`rustpython-ast`,
//! the pattern `examples/proboscis-pinjected/packages/pinjected-linter/rust-poc` uses for its
//! own Python-focused linter. The other source languages share a single `tree-sitter` runtime,
//! the pattern `examples/ekropotin-quickmark` uses (`tree-sitter` + a per-language grammar crate)
//! for its one non-host language. `Tree` is the typed union rule visitors match on; parsing never
//! mutates or executes the source, honoring spec.md §1's Non-goals.

pub mod bash;
pub mod css;
pub mod markdown;
pub mod python;
pub mod typescript;

use std::fmt;

/// Canonical language tag used throughout contexts, rules, and config overlays (spec.md §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Language {
    Python,
    TypeScript,
    JavaScript,
    Bash,
    Markdown,
    Css,
    Other,
}

impl Language {
    /// Classifies a file by extension, the first step of orchestrator file processing
    /// (spec.md §4.1 step 4).
    pub fn from_extension(path: &std::path::Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("py" | "pyi") => Language::Python,
            Some("ts" | "tsx" | "mts" | "cts") => Language::TypeScript,
            Some("js" | "jsx" | "mjs" | "cjs") => Language::JavaScript,
            Some("sh" | "bash" | "zsh") => Language::Bash,
            Some("md" | "markdown" | "mdx") => Language::Markdown,
            Some("css" | "scss") => Language::Css,
            _ => Language::Other,
        }
    }

    pub fn as_tag(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::TypeScript => "typescript",
            Language::JavaScript => "javascript",
            Language::Bash => "bash",
            Language::Markdown => "markdown",
            Language::Css => "css",
            Language::Other => "other",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_tag())
    }
}

/// A parsed source tree, typed per language. `Tree::None` stands in for files whose
/// extension maps to `Language::Other` (no analyzer applies; text-only rules still run).
pub enum Tree {
    Python(python::PythonTree),
    TypeScript(typescript::TsTree),
    Bash(bash::BashTree),
    Markdown(markdown::MarkdownTree),
    Css(css::CssTree),
    None,
}

/// Non-fatal per-file parse failure (spec.md §7: "Parse errors ... Non-fatal").
#[derive(Debug, Clone, thiserror::Error)]
#[error("failed to parse {language} source: {message}")]
pub struct ParseError {
    pub language: Language,
    pub message: String,
}

/// Parses `source` according to `language`. Never panics; syntax errors become `Err` and
/// the orchestrator/`LintContext` degrade to text-only analysis for that file (spec.md §7).
pub fn parse(source: &str, language: Language) -> Result<Tree, ParseError> {
    match language {
        Language::Python => python::parse(source).map(Tree::Python),
        Language::TypeScript | Language::JavaScript => typescript::parse(source, language).map(Tree::TypeScript),
        Language::Bash => bash::parse(source).map(Tree::Bash),
        Language::Markdown => markdown::parse(source).map(Tree::Markdown),
        Language::Css => css::parse(source).map(Tree::Css),
        Language::Other => Ok(Tree::None),
    }
}
