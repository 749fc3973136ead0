//! `dry.duplicate-code` (spec.md §4.6): the cross-file DRY rule. Buffers tokenized/hashed
//! `CodeBlock`s per file in `check`, then aggregates and emits in `finalize` — the only way a
//! cross-file duplicate can be detected, since no single `check` call sees more than one file.

use crate::analyzers::Language;
use crate::dry::cache::DryCache;
use crate::dry::{aggregator, cache, hasher, single_statement, tokenizer, CodeBlock, DryConfig};
use crate::lint_context::LintContext;
use crate::rule::Rule;
use crate::violation::{Severity, Violation};

const RULE_ID: &str = "dry.duplicate-code";
const LANGUAGES: &[Language] = &[Language::Python, Language::TypeScript, Language::JavaScript];

#[derive(Clone)]
pub struct DryDuplicateCodeRule {
    blocks: Vec<CodeBlock>,
    config: Option<DryConfig>,
    project_root: std::path::PathBuf,
}

impl DryDuplicateCodeRule {
    pub fn new(project_root: impl Into<std::path::PathBuf>) -> Self {
        Self {
            blocks: Vec::new(),
            config: None,
            project_root: project_root.into(),
        }
    }
}

impl Default for DryDuplicateCodeRule {
    fn default() -> Self {
        Self::new(".")
    }
}

impl Rule for DryDuplicateCodeRule {
    fn rule_id(&self) -> &'static str {
        RULE_ID
    }

    fn description(&self) -> &'static str {
        "repeated multi-line code blocks across (or within) files should be extracted"
    }

    fn languages(&self) -> &'static [Language] {
        LANGUAGES
    }

    fn check(&mut self, ctx: &LintContext) -> Vec<Violation> {
        let config = self
            .config
            .get_or_insert_with(|| DryConfig::from_section(owned_section(ctx, "dry").as_ref(), ctx.language.as_tag()))
            .clone();

        let cache = self.open_cache(&config);
        let config_hash = cache::config_hash(config.min_duplicate_lines);
        let mtime = std::fs::metadata(&ctx.file_path).ok().and_then(|m| m.modified().ok()).map(to_unix).unwrap_or(0);

        let blocks = if cache.is_fresh(config_hash, &ctx.file_path, mtime) {
            cache.load(config_hash, &ctx.file_path).unwrap_or_default()
        } else {
            let fresh = tokenize_file(ctx, &config);
            cache.store(config_hash, &ctx.file_path, mtime, ctx.file_content.len(), &fresh);
            fresh
        };

        self.blocks.extend(blocks);
        Vec::new()
    }

    fn finalize(&mut self) -> Vec<Violation> {
        let min_occurrences = self.config.as_ref().map(|c| c.min_occurrences).unwrap_or(2);
        let groups = aggregator::aggregate(std::mem::take(&mut self.blocks), min_occurrences);

        let mut out = Vec::new();
        for group in &groups {
            for block in &group.blocks {
                let others = group.blocks.len() - 1;
                out.push(
                    Violation::new(
                        RULE_ID,
                        &block.file_path,
                        block.start_line,
                        0,
                        format!(
                            "lines {}-{} duplicate {} other location{}",
                            block.start_line,
                            block.end_line,
                            others,
                            if others == 1 { "" } else { "s" }
                        ),
                        Severity::Warning,
                    )
                    .with_end(block.end_line, 0)
                    .with_suggestion("extract the shared logic into a function or shared module"),
                );
            }
        }
        out
    }

    fn reset(&mut self) {
        self.blocks.clear();
        self.config = None;
    }
}

impl DryDuplicateCodeRule {
    fn open_cache(&self, config: &DryConfig) -> DryCache {
        if !config.cache_enabled {
            return DryCache::disabled();
        }
        let path = config.cache_path.clone().unwrap_or_else(|| cache::default_cache_path(&self.project_root));
        DryCache::open(&path, cache::config_hash(config.min_duplicate_lines))
    }
}

/// `LintContext::rule_config` hands back the raw `serde_yml::Value` stored in metadata; rule
/// wrappers that need the typed `RuleSection` view (for `overlay`) deserialize it here.
fn owned_section(ctx: &LintContext, rule_id: &str) -> Option<crate::config::types::RuleSection> {
    ctx.rule_config(rule_id).and_then(|v| serde_yml::from_value(v.clone()).ok())
}

fn to_unix(t: std::time::SystemTime) -> i64 {
    t.duration_since(std::time::UNIX_EPOCH).map(|d| d.as_secs() as i64).unwrap_or(0)
}

fn tokenize_file(ctx: &LintContext, config: &DryConfig) -> Vec<CodeBlock> {
    let normalized = tokenizer::normalize(&ctx.file_content, ctx.language);
    let candidates = hasher::make_blocks(&ctx.file_path, &normalized, config.min_duplicate_lines);
    let raw_lines = ctx.raw_lines();

    candidates
        .into_iter()
        .filter(|block| {
            if block.start_line == 0 || block.end_line > raw_lines.len() {
                return true;
            }
            let raw: Vec<&str> = raw_lines[block.start_line - 1..block.end_line].iter().map(String::as_str).collect();
            !single_statement::is_single_statement(&raw, ctx.language)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::Language;
    use std::collections::HashMap;

    #[test]
    fn duplicate_block_across_two_files_is_flagged_in_finalize() {
        let mut rule = DryDuplicateCodeRule::new(".");
        rule.config = Some(DryConfig {
            cache_enabled: false,
            min_duplicate_lines: 3,
            ..DryConfig::default()
        });
        // Exactly `min_duplicate_lines` normalized lines per file, so each file yields exactly
        // one window; three independent assignments never reparse as a single statement, so the
        // single-statement detector doesn't interfere.
        let src = "timeout = 30\nretries = 5\nbackoff = 2\n";
        let ctx_a = LintContext::new("a.py", Language::Python, src.to_string(), HashMap::new());
        let ctx_b = LintContext::new("b.py", Language::Python, src.to_string(), HashMap::new());
        rule.check(&ctx_a);
        rule.check(&ctx_b);
        let violations = rule.finalize();
        assert_eq!(violations.len(), 2);
        assert!(violations.iter().all(|v| v.rule_id == RULE_ID));
    }

    #[test]
    fn a_complete_for_block_repeated_across_files_is_still_flagged() {
        // spec.md §4.6 clause (d) exempts "any block that parses as a single statement," but
        // spec.md §8's own worked example is exactly such a block (a for/if/call statement).
        // is_compound_block narrows clause (d) to simple multi-line statements so this case
        // remains detectable; see DESIGN.md.
        let mut rule = DryDuplicateCodeRule::new(".");
        rule.config = Some(DryConfig {
            cache_enabled: false,
            min_duplicate_lines: 3,
            ..DryConfig::default()
        });
        let src = "for item in items:\n    if item.valid:\n        item.save()\n";
        let ctx_a = LintContext::new("a.py", Language::Python, src.to_string(), HashMap::new());
        let ctx_b = LintContext::new("b.py", Language::Python, src.to_string(), HashMap::new());
        rule.check(&ctx_a);
        rule.check(&ctx_b);
        assert_eq!(rule.finalize().len(), 2);
    }

    #[test]
    fn unique_files_produce_no_violations() {
        let mut rule = DryDuplicateCodeRule::new(".");
        rule.config = Some(DryConfig {
            cache_enabled: false,
            min_duplicate_lines: 3,
            ..DryConfig::default()
        });
        let ctx_a = LintContext::new("a.py", Language::Python, "x = 1\ny = 2\n".to_string(), HashMap::new());
        rule.check(&ctx_a);
        assert!(rule.finalize().is_empty());
    }

    #[test]
    fn reset_clears_buffered_blocks_between_runs() {
        let mut rule = DryDuplicateCodeRule::new(".");
        rule.config = Some(DryConfig {
            cache_enabled: false,
            min_duplicate_lines: 3,
            ..DryConfig::default()
        });
        let src = "def handler(req):\n    validate(req)\n    process(req)\n    respond(req)\n";
        let ctx = LintContext::new("a.py", Language::Python, src.to_string(), HashMap::new());
        rule.check(&ctx);
        rule.reset();
        assert!(rule.finalize().is_empty());
    }
}
