//! `dry.duplicate-constant` (spec.md §4.6): the duplicate-constants subsystem as a cross-file
//! rule — buffers every module-level constant definition in `check`, clusters by exact/fuzzy
//! name match across files in `finalize`.

use crate::analyzers::Language;
use crate::dry::constants::{self, ConstantDefinition};
use crate::lint_context::LintContext;
use crate::rule::Rule;
use crate::violation::{Severity, Violation};

const RULE_ID: &str = "dry.duplicate-constant";
const DEFAULT_MIN_OCCURRENCES: usize = 2;
const LANGUAGES: &[Language] = &[Language::Python, Language::TypeScript, Language::JavaScript];

#[derive(Clone, Default)]
pub struct DryDuplicateConstantRule {
    definitions: Vec<ConstantDefinition>,
    min_occurrences: Option<usize>,
}

impl Rule for DryDuplicateConstantRule {
    fn rule_id(&self) -> &'static str {
        RULE_ID
    }

    fn description(&self) -> &'static str {
        "near-identical named constants defined independently in multiple files should be unified"
    }

    fn languages(&self) -> &'static [Language] {
        LANGUAGES
    }

    fn check(&mut self, ctx: &LintContext) -> Vec<Violation> {
        let enabled = ctx
            .rule_config("dry")
            .and_then(|v| v.get("detect_duplicate_constants"))
            .and_then(|v| v.as_bool())
            .unwrap_or(true);
        if !enabled {
            return Vec::new();
        }

        self.min_occurrences.get_or_insert_with(|| {
            ctx.rule_config("dry")
                .and_then(|v| v.get("min_constant_occurrences"))
                .and_then(|v| v.as_u64())
                .map(|v| v as usize)
                .unwrap_or(DEFAULT_MIN_OCCURRENCES)
        });

        let lines: Vec<&str> = ctx.raw_lines().iter().map(String::as_str).collect();
        let defs = match ctx.language {
            Language::Python => constants::extract_python(&lines, &ctx.file_path),
            Language::TypeScript | Language::JavaScript => constants::extract_typescript(&lines, &ctx.file_path),
            _ => Vec::new(),
        };
        self.definitions.extend(defs);
        Vec::new()
    }

    fn finalize(&mut self) -> Vec<Violation> {
        let min_occurrences = self.min_occurrences.unwrap_or(DEFAULT_MIN_OCCURRENCES);
        let defs = std::mem::take(&mut self.definitions);
        let groups = constants::group_matches(&defs, min_occurrences);

        let mut out = Vec::new();
        for indices in &groups {
            let names: Vec<&str> = indices.iter().map(|&i| defs[i].name.as_str()).collect();
            for &i in indices {
                let def = &defs[i];
                let others: Vec<&str> = names.iter().filter(|&&n| n != def.name).copied().collect();
                out.push(
                    Violation::new(
                        RULE_ID,
                        &def.file_path,
                        def.line,
                        0,
                        format!(
                            "constant '{}' duplicates {} elsewhere: {}",
                            def.name,
                            others.len(),
                            others.join(", ")
                        ),
                        Severity::Warning,
                    )
                    .with_suggestion("define the constant once and import it from a shared module"),
                );
            }
        }
        out
    }

    fn reset(&mut self) {
        self.definitions.clear();
        self.min_occurrences = None;
    }
}
