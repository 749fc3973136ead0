//! Level 1: repository-level `.thailintignore` (spec.md §4.2).
//!
//! Gitignore-style globs, matched project-relative. We reuse the `ignore` crate's `Gitignore`
//! builder — the same crate `examples/sthagen-rvben-rumdl` depends on (`ignore = "0.4.25"`) for
//! its own directory walking — rather than hand-rolling `fnmatch`, since it implements the same
//! semantics spec.md calls for ("trailing `/` restricts to directory matches; `**` matches any
//! path segments; otherwise wildcard matching") and is the idiomatic crate for it.

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::path::Path;

pub struct RepoIgnore {
    matcher: Option<Gitignore>,
}

impl RepoIgnore {
    /// Loads `.thailintignore` from `project_root`, if present. A missing file means nothing
    /// is repo-ignored (spec.md §4.2: blank/absent file contributes no patterns).
    pub fn load(project_root: &Path) -> Self {
        let ignore_file = project_root.join(".thailintignore");
        if !ignore_file.is_file() {
            return Self { matcher: None };
        }
        let mut builder = GitignoreBuilder::new(project_root);
        if builder.add(&ignore_file).is_some() {
            // `add` returning `Some` means an I/O error reading the file; degrade to "no patterns"
            // rather than raising (spec.md §4.2/§7 contract: ignore parsing never throws).
            return Self { matcher: None };
        }
        match builder.build() {
            Ok(m) => Self { matcher: Some(m) },
            Err(_) => Self { matcher: None },
        }
    }

    pub fn empty() -> Self {
        Self { matcher: None }
    }

    /// True if `rel_path` (project-relative) matches a repository-level ignore pattern.
    pub fn is_ignored(&self, rel_path: &Path, is_dir: bool) -> bool {
        match &self.matcher {
            None => false,
            Some(m) => m.matched(rel_path, is_dir).is_ignore(),
        }
    }
}
