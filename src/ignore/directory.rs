//! Level 2: directory-level `.lintconfig` (spec.md §4.2).
//!
//! Each directory may carry a `.lintconfig` file listing `ignore: <rule-id-or-pattern>` lines,
//! one per line, applying to every file within that directory (non-recursive — a subdirectory
//! needs its own `.lintconfig` to inherit the same ignores, per spec.md §4.2). Grounded in
//! `examples/original_source/src/linter_config/ignore.py`'s `_load_directory_ignores`.

use super::directives::any_rule_matches;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

const FILE_NAME: &str = ".lintconfig";

pub struct DirectoryIgnore {
    /// directory path -> rule patterns ignored for every file directly inside it.
    patterns_by_dir: HashMap<PathBuf, Vec<String>>,
}

impl DirectoryIgnore {
    pub fn empty() -> Self {
        Self {
            patterns_by_dir: HashMap::new(),
        }
    }

    /// Loads the `.lintconfig` for `dir`, if present, and caches it. Returns a new engine with
    /// this directory's patterns merged in.
    pub fn load_dir(mut self, dir: &Path) -> Self {
        if self.patterns_by_dir.contains_key(dir) {
            return self;
        }
        let path = dir.join(FILE_NAME);
        let patterns = match std::fs::read_to_string(&path) {
            Ok(content) => parse_lintconfig(&content),
            Err(_) => Vec::new(),
        };
        self.patterns_by_dir.insert(dir.to_path_buf(), patterns);
        self
    }

    /// True if `rule_id` is ignored for any file directly within `dir`.
    pub fn is_ignored(&self, dir: &Path, rule_id: &str) -> bool {
        match self.patterns_by_dir.get(dir) {
            Some(patterns) => any_rule_matches(rule_id, patterns),
            None => false,
        }
    }
}

fn parse_lintconfig(content: &str) -> Vec<String> {
    content
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                return None;
            }
            line.strip_prefix("ignore:").map(|rest| rest.trim().to_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn parses_ignore_lines_and_skips_comments() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(FILE_NAME),
            "# comment\nignore: dry.*\n\nignore: nesting.max-depth\n",
        )
        .unwrap();
        let engine = DirectoryIgnore::empty().load_dir(tmp.path());
        assert!(engine.is_ignored(tmp.path(), "dry.duplicate-code"));
        assert!(engine.is_ignored(tmp.path(), "nesting.max-depth"));
        assert!(!engine.is_ignored(tmp.path(), "srp.max-methods"));
    }

    #[test]
    fn directory_without_lintconfig_ignores_nothing() {
        let tmp = TempDir::new().unwrap();
        let engine = DirectoryIgnore::empty().load_dir(tmp.path());
        assert!(!engine.is_ignored(tmp.path(), "anything"));
    }

    #[test]
    fn is_not_inherited_by_subdirectories() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(FILE_NAME), "ignore: dry.*\n").unwrap();
        let sub = tmp.path().join("sub");
        fs::create_dir(&sub).unwrap();
        let engine = DirectoryIgnore::empty().load_dir(tmp.path()).load_dir(&sub);
        assert!(engine.is_ignored(tmp.path(), "dry.duplicate-code"));
        assert!(!engine.is_ignored(&sub, "dry.duplicate-code"));
    }
}
