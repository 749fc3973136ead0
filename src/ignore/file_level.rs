//! Level 3: file-level `ignore-file` directive (spec.md §4.2).
//!
//! Scanned only in the first 10 lines of a file (spec.md §4.2: "a file-level ignore must appear
//! near the top of the file to be honored — this bounds the scan and matches the convention of
//! shebang/license-header/linter-directive blocks"). `# thailint: ignore-file` ignores the whole
//! file for every rule; `# thailint: ignore-file[a.*, b.exact]` restricts it to matching rules.

use super::directives::{find_directive, DirectiveMatch};

const SCAN_LINES: usize = 10;

/// Scans the leading lines of `content` for a file-level ignore directive.
pub fn file_level_ignore(content: &str) -> Option<DirectiveMatch> {
    for line in content.lines().take(SCAN_LINES) {
        if let Some(m) = find_directive(line, "ignore-file") {
            return Some(m);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_ignore_file_covers_every_rule() {
        let content = "#!/usr/bin/env python\n# thailint: ignore-file\nprint('hi')\n";
        let m = file_level_ignore(content).unwrap();
        assert!(m.applies_to("anything.at.all"));
    }

    #[test]
    fn bracketed_ignore_file_restricts_to_matching_rules() {
        let content = "# thailint: ignore-file[dry.*]\nprint('hi')\n";
        let m = file_level_ignore(content).unwrap();
        assert!(m.applies_to("dry.duplicate-code"));
        assert!(!m.applies_to("nesting.max-depth"));
    }

    #[test]
    fn directive_past_line_ten_is_not_honored() {
        let mut content = String::new();
        for i in 0..15 {
            content.push_str(&format!("line {i}\n"));
        }
        content.push_str("# thailint: ignore-file\n");
        assert!(file_level_ignore(&content).is_none());
    }
}
