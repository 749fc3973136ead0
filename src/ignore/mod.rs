//! C2: Ignore Parser (spec.md §4.2).
//!
//! Five independent levels, checked in precedence order repository > file > block/next-line >
//! line; any "ignored" answer short-circuits the rest (spec.md §4.2). The directory level
//! (`.lintconfig`) is orthogonal to violation line numbers (it targets whole rules for a whole
//! directory) so it's folded in alongside the repository check.

pub mod block_line;
pub mod directives;
pub mod directory;
pub mod file_level;
pub mod repo;

use self::block_line::LineIgnores;
use self::directory::DirectoryIgnore;
use self::file_level::file_level_ignore;
use self::repo::RepoIgnore;
use crate::violation::Violation;
use std::path::{Path, PathBuf};

/// Precomputed ignore state for a single file, assembled once per orchestration run per file
/// and then queried per-violation (spec.md §3: ignore parsing happens once, not per-rule).
pub struct FileIgnores {
    file_level: Option<self::directives::DirectiveMatch>,
    lines: LineIgnores,
}

impl FileIgnores {
    pub fn build(content: &str) -> Self {
        Self {
            file_level: file_level_ignore(content),
            lines: LineIgnores::scan(content),
        }
    }

    fn rule_ignored_everywhere(&self, rule_id: &str) -> bool {
        self.file_level.as_ref().is_some_and(|m| m.applies_to(rule_id))
    }
}

/// Top-level engine combining all five levels. Built once per orchestration run; directories
/// are registered lazily as files are discovered under them.
pub struct IgnoreEngine {
    repo: RepoIgnore,
    directories: DirectoryIgnore,
}

impl IgnoreEngine {
    pub fn new(project_root: &Path) -> Self {
        Self {
            repo: RepoIgnore::load(project_root),
            directories: DirectoryIgnore::empty(),
        }
    }

    pub fn without_repo() -> Self {
        Self {
            repo: RepoIgnore::empty(),
            directories: DirectoryIgnore::empty(),
        }
    }

    /// Registers `dir`'s `.lintconfig`, if not already loaded. Call once per directory
    /// encountered while walking, before checking files within it.
    pub fn register_directory(&mut self, dir: &Path) {
        let engine = std::mem::replace(&mut self.directories, DirectoryIgnore::empty());
        self.directories = engine.load_dir(dir);
    }

    /// Level 1: is `rel_path` repo-ignored outright (applies to the whole file, all rules)?
    pub fn is_path_ignored(&self, rel_path: &Path, is_dir: bool) -> bool {
        self.repo.is_ignored(rel_path, is_dir)
    }

    /// Answers "should this violation be suppressed", applying levels 2-5 in precedence order.
    /// Level 1 (repository) is expected to have already been applied via `is_path_ignored`
    /// during file discovery, so a file never reaches this stage at all if repo-ignored.
    pub fn should_ignore(
        &self,
        file_ignores: &FileIgnores,
        dir: &Path,
        rule_id: &str,
        line: usize,
    ) -> bool {
        if file_ignores.rule_ignored_everywhere(rule_id) {
            return true;
        }
        if self.directories.is_ignored(dir, rule_id) {
            return true;
        }
        file_ignores.lines.is_ignored(line, rule_id)
    }

    /// Filters `violations`, dropping any that are ignored for their file's content.
    pub fn filter_violations(
        &self,
        violations: Vec<Violation>,
        file_ignores: &FileIgnores,
        dir: &Path,
    ) -> Vec<Violation> {
        violations
            .into_iter()
            .filter(|v| !self.should_ignore(file_ignores, dir, &v.rule_id, v.line))
            .collect()
    }
}

/// Convenience used by tests and single-file library entry points (spec.md §6) where no
/// orchestrator-level directory walk has populated an `IgnoreEngine`.
pub fn filter_single_file(
    violations: Vec<Violation>,
    file_path: &Path,
    content: &str,
) -> Vec<Violation> {
    let dir = file_path.parent().map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from("."));
    let mut engine = IgnoreEngine::without_repo();
    engine.register_directory(&dir);
    let file_ignores = FileIgnores::build(content);
    engine.filter_violations(violations, &file_ignores, &dir)
}
