//! `LintContext`: the per-file working set passed to every rule's `check` (spec.md §3).
//!
//! Grounded in `examples/sthagen-rvben-rumdl/src/lint_context/mod.rs`'s `LintContext<'a>`
//! (content + pre-computed line/caches, lazily materialized via `OnceLock`), generalized from a
//! Markdown-only struct to the cross-language context spec.md §3 describes: `file_path`,
//! `language`, `file_content`, `metadata`, and a lazily-parsed `ast`.

use crate::analyzers::{self, Language, ParseError, Tree};
use once_cell::sync::OnceCell;
use std::collections::HashMap;

/// Per-rule configuration value, kept as a dynamically-typed YAML value (spec.md §3:
/// "metadata (mapping of rule-id → per-rule config dict)"). Rules that want a typed view
/// deserialize their own section out of this with `serde_yml::from_value`.
pub type RuleMetadata = HashMap<String, serde_yml::Value>;

pub struct LintContext {
    pub file_path: String,
    pub language: Language,
    pub file_content: String,
    pub metadata: RuleMetadata,
    lines: Vec<String>,
    ast: OnceCell<Result<Tree, ParseError>>,
}

impl LintContext {
    pub fn new(file_path: impl Into<String>, language: Language, file_content: String, metadata: RuleMetadata) -> Self {
        let lines = file_content.lines().map(str::to_string).collect();
        Self {
            file_path: file_path.into(),
            language,
            file_content,
            metadata,
            lines,
            ast: OnceCell::new(),
        }
    }

    /// Physical lines of `file_content`, 0-indexed in the returned slice (callers add 1 for
    /// the 1-indexed line numbers violations use).
    pub fn raw_lines(&self) -> &[String] {
        &self.lines
    }

    /// Lazily parses `file_content` on first access and caches the result for the lifetime of
    /// this context — "A file is parsed at most once per orchestration run regardless of how
    /// many rules inspect it" (spec.md §3 invariants).
    pub fn ast(&self) -> Result<&Tree, &ParseError> {
        self.ast
            .get_or_init(|| analyzers::parse(&self.file_content, self.language))
            .as_ref()
    }

    /// Per-rule config section, if the loaded configuration has one for `rule_id`.
    pub fn rule_config(&self, rule_id: &str) -> Option<&serde_yml::Value> {
        self.metadata.get(rule_id)
    }
}
