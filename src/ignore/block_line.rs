//! Levels 4-5: method/block-scoped and line-scoped ignores (spec.md §4.2).
//!
//! - `# thailint: ignore-next-line[...]` on line N suppresses matching rules on line N+1.
//! - `# thailint: ignore-start[...]` / `# thailint: ignore-end` bracket an inclusive range.
//! - `# thailint: ignore[...]` (and the `# noqa` / `# noqa: <rule>` synonym) suppresses matching
//!   rules on the same line it appears on.
//!
//! All three are precomputed per-file into a `LineIgnores` table so the orchestrator can answer
//! "is rule R ignored on line L" in O(1) during violation filtering, mirroring the per-line
//! directive cache `examples/original_source/src/linter_config/ignore.py` builds once per file
//! (`_scan_inline_ignores`) instead of re-scanning text for every violation.

use super::directives::{find_directive, find_noqa_directive, DirectiveMatch};
use std::collections::HashMap;

#[derive(Default)]
pub struct LineIgnores {
    /// 1-indexed line -> directive applying to that line (same-line `ignore`/`noqa`, or a
    /// next-line directive projected forward, or an ignore-start/ignore-end range membership).
    same_line: HashMap<usize, DirectiveMatch>,
    next_line: HashMap<usize, DirectiveMatch>,
    block_ranges: Vec<(usize, usize, DirectiveMatch)>,
}

impl LineIgnores {
    /// Scans every line of `content` and builds the table once.
    pub fn scan(content: &str) -> Self {
        let mut same_line = HashMap::new();
        let mut next_line = HashMap::new();
        let mut block_ranges = Vec::new();
        let mut open_block: Option<(usize, DirectiveMatch)> = None;

        for (idx, line) in content.lines().enumerate() {
            let lineno = idx + 1;

            if let Some(m) = find_directive(line, "ignore-start") {
                open_block = Some((lineno, m));
                continue;
            }
            if find_directive(line, "ignore-end").is_some() {
                if let Some((start, m)) = open_block.take() {
                    block_ranges.push((start, lineno, m));
                }
                continue;
            }
            if let Some(m) = find_directive(line, "ignore-next-line") {
                next_line.insert(lineno + 1, m);
                continue;
            }
            if let Some(m) = find_directive(line, "ignore") {
                same_line.insert(lineno, m);
                continue;
            }
            if let Some(m) = find_noqa_directive(line) {
                same_line.insert(lineno, m);
            }
        }

        // An ignore-start left unterminated extends to end of file (best-effort, never panics).
        if let Some((start, m)) = open_block {
            let last = content.lines().count().max(start);
            block_ranges.push((start, last, m));
        }

        Self {
            same_line,
            next_line,
            block_ranges,
        }
    }

    /// True if `rule_id` is ignored on `line` (1-indexed) by any of the same-line, next-line,
    /// or block mechanisms. Precedence among these three doesn't matter (spec.md §4.2: they
    /// never overlap in practice and any match short-circuits to "ignored").
    pub fn is_ignored(&self, line: usize, rule_id: &str) -> bool {
        if let Some(m) = self.same_line.get(&line) {
            if m.applies_to(rule_id) {
                return true;
            }
        }
        if let Some(m) = self.next_line.get(&line) {
            if m.applies_to(rule_id) {
                return true;
            }
        }
        for (start, end, m) in &self.block_ranges {
            if line >= *start && line <= *end && m.applies_to(rule_id) {
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_line_ignore_suppresses_only_that_line() {
        let content = "a = 1\nb = 2  # thailint: ignore[dry.*]\nc = 3\n";
        let table = LineIgnores::scan(content);
        assert!(table.is_ignored(2, "dry.duplicate-code"));
        assert!(!table.is_ignored(1, "dry.duplicate-code"));
        assert!(!table.is_ignored(3, "dry.duplicate-code"));
    }

    #[test]
    fn ignore_next_line_shifts_forward_one_line() {
        let content = "# thailint: ignore-next-line[nesting.*]\nbad_line()\nfine_line()\n";
        let table = LineIgnores::scan(content);
        assert!(!table.is_ignored(1, "nesting.max-depth"));
        assert!(table.is_ignored(2, "nesting.max-depth"));
        assert!(!table.is_ignored(3, "nesting.max-depth"));
    }

    #[test]
    fn ignore_start_end_covers_inclusive_range() {
        let content = "# thailint: ignore-start[dry.*]\nbad1()\nbad2()\n# thailint: ignore-end\nfine()\n";
        let table = LineIgnores::scan(content);
        assert!(table.is_ignored(2, "dry.duplicate-code"));
        assert!(table.is_ignored(3, "dry.duplicate-code"));
        assert!(!table.is_ignored(5, "dry.duplicate-code"));
    }

    #[test]
    fn noqa_synonym_is_recognized_same_line() {
        let content = "x = 1  # noqa: srp.max-methods\n";
        let table = LineIgnores::scan(content);
        assert!(table.is_ignored(1, "srp.max-methods"));
        assert!(!table.is_ignored(1, "other.rule"));
    }

    #[test]
    fn unterminated_block_extends_to_end_of_file() {
        let content = "# thailint: ignore-start\nbad1()\nbad2()\n";
        let table = LineIgnores::scan(content);
        assert!(table.is_ignored(3, "anything"));
    }
}
