//! C8: the Orchestrator (spec.md §4.1) — the single `lint` entry point that resolves the
//! project root and config, walks the target path, parses and checks each file, runs every
//! stateful rule's `finalize`, filters ignores, and returns a deterministically sorted
//! `Vec<Violation>`.
//!
//! Grounded in `examples/other_examples/3b6aa7f6_rvben-rumdl__src-file_processor.rs.rs`'s
//! `find_markdown_files` (an `ignore::WalkBuilder` configured with `hidden(false)`,
//! `git_ignore`, type/override filtering, and `.is_file()` filtering during the walk) and
//! `examples/sthagen-rvben-rumdl/src/lib.rs`'s `lint`/`lint_and_index` two-phase per-file/
//! cross-file shape, generalized here to spec.md §4.1's explicit run lifecycle (reset, walk +
//! check, finalize, ignore filter, sort).

use crate::analyzers::Language;
use crate::config::{load_config, Config};
use crate::ignore::{FileIgnores, IgnoreEngine};
use crate::lint_context::{LintContext, RuleMetadata};
use crate::registry::{all_rules, rules_matching_prefix};
use crate::rule::Rule;
use crate::violation::{sort_violations, Violation};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Directory names the walk never descends into, regardless of `.gitignore` (spec.md §4.1:
/// "standard exclusions `.git/`, `node_modules/`, `__pycache__/`, `.venv/`").
const STANDARD_EXCLUSIONS: &[&str] = &[".git", "node_modules", "__pycache__", ".venv"];

/// Runs a full lint of `target`, optionally restricted to rules whose `rule_id` matches one
/// of `rule_prefixes` (e.g. `["lbyl", "dry"]`). Resolves config by ascending from `target`,
/// same as `load_config` (spec.md §4.4).
pub fn lint(target: &Path, rule_prefixes: Option<&[String]>) -> Vec<Violation> {
    let config = load_config(target, None).unwrap_or_default();
    lint_with_config(target, &config, rule_prefixes)
}

pub fn lint_with_config(target: &Path, config: &Config, rule_prefixes: Option<&[String]>) -> Vec<Violation> {
    let project_root = config.project_root.clone().unwrap_or_else(|| {
        if target.is_dir() {
            target.to_path_buf()
        } else {
            target.parent().map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from("."))
        }
    });

    let mut rules = select_rules(&project_root, config, rule_prefixes);
    for rule in &mut rules {
        rule.reset();
    }

    let mut ignore_engine = IgnoreEngine::new(&project_root);
    let mut per_file_violations: Vec<Violation> = Vec::new();

    for path in discover_files(target, config) {
        let rel = path.strip_prefix(&project_root).map(Path::to_path_buf).unwrap_or_else(|_| path.clone());
        if ignore_engine.is_path_ignored(&rel, false) {
            continue;
        }

        let dir = path.parent().map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from("."));
        ignore_engine.register_directory(&dir);

        let Ok(content) = std::fs::read_to_string(&path) else { continue };
        let file_ignores = FileIgnores::build(&content);
        let language = Language::from_extension(&path);
        let file_path = rel.to_string_lossy().replace('\\', "/");
        let metadata = rule_metadata(config);
        let ctx = LintContext::new(file_path.clone(), language, content, metadata);

        let mut file_violations = Vec::new();
        for rule in &mut rules {
            if !rule.languages().contains(&language) {
                continue;
            }
            file_violations.extend(rule.check(&ctx));
        }

        per_file_violations.extend(ignore_engine.filter_violations(file_violations, &file_ignores, &dir));
    }

    // rule_id-lexicographic finalize order (spec.md §4.1 step: "finalize runs after every
    // file's check, in rule_id order, so cross-file output is deterministic regardless of
    // walk order").
    rules.sort_by(|a, b| a.rule_id().cmp(b.rule_id()));
    for rule in &mut rules {
        per_file_violations.extend(rule.finalize());
    }

    sort_violations(&mut per_file_violations);
    per_file_violations
}

fn select_rules(project_root: &Path, config: &Config, rule_prefixes: Option<&[String]>) -> Vec<Box<dyn Rule>> {
    let rules = all_rules(project_root);
    let rules = match rule_prefixes {
        Some(prefixes) if !prefixes.is_empty() => prefixes.iter().flat_map(|p| rules_matching_prefix(&rules, p)).collect(),
        _ => rules,
    };
    rules.into_iter().filter(|r| is_enabled(r.as_ref(), config)).collect()
}

fn is_enabled(rule: &dyn Rule, config: &Config) -> bool {
    let category = rule.rule_id().split('.').next().unwrap_or(rule.rule_id());
    if !config.global.enable.is_empty() {
        return config.global.enable.iter().any(|e| e == category || e == rule.rule_id());
    }
    if config.global.disable.iter().any(|d| d == category || d == rule.rule_id()) {
        return false;
    }
    config.is_rule_enabled(category, true)
}

/// Per-category config sections, re-serialized into the `RuleMetadata` bag `LintContext`
/// exposes via `rule_config` (rules look up their own category, e.g. `"lbyl"`, `"dry"`).
fn rule_metadata(config: &Config) -> RuleMetadata {
    config
        .rules
        .iter()
        .filter_map(|(category, section)| serde_yml::to_value(section).ok().map(|v| (category.clone(), v)))
        .collect()
}

/// Walks `target` with `ignore::WalkBuilder`, respecting `config.global.recursive`,
/// `config.global.exclude`, symlink-cycle safety, and the standard exclusions.
fn discover_files(target: &Path, config: &Config) -> Vec<PathBuf> {
    if target.is_file() {
        return vec![target.to_path_buf()];
    }

    let mut builder = WalkBuilder::new(target);
    builder.hidden(false);
    builder.git_ignore(true);
    builder.git_global(true);
    builder.git_exclude(true);
    builder.parents(true);
    builder.require_git(false);
    builder.follow_links(false);
    builder.max_depth(if config.global.recursive { None } else { Some(1) });

    if !config.global.exclude.is_empty() {
        let mut overrides = ignore::overrides::OverrideBuilder::new(target);
        for pattern in &config.global.exclude {
            let rule = if pattern.starts_with('!') { pattern.clone() } else { format!("!{pattern}") };
            let _ = overrides.add(&rule);
        }
        if let Ok(overrides) = overrides.build() {
            builder.overrides(overrides);
        }
    }

    builder.filter_entry(|entry| {
        entry
            .file_name()
            .to_str()
            .is_none_or(|name| !STANDARD_EXCLUSIONS.contains(&name))
    });

    let mut out = Vec::new();
    for entry in builder.build().flatten() {
        if entry.file_type().is_some_and(|t| t.is_file()) {
            out.push(entry.into_path());
        }
    }
    out.sort();
    out
}
